use docbatch_core::{FileOutcome, ListView, Task};

const SUPPORTED_MARK: &str = "●";
const UNSUPPORTED_MARK: &str = "✗";

/// Text lines for the file list: one row per file with its support marker,
/// extension and icon asset.
pub fn list_lines(view: &ListView) -> Vec<String> {
    if view.rows.is_empty() {
        return vec![
            "You need to choose files".to_string(),
            "  pdf, pptx, docx ....".to_string(),
        ];
    }

    let mut lines = Vec::with_capacity(view.rows.len() + 2);
    let header = match view.task {
        Task::Convert => format!("{} ({} files)", view.task.verb(), view.rows.len()),
        Task::Compress => format!(
            "{} ({} files, level {})",
            view.task.verb(),
            view.rows.len(),
            view.compression
        ),
    };
    lines.push(header);

    let width = view
        .rows
        .iter()
        .map(|row| row.title.chars().count())
        .max()
        .unwrap_or(0);
    for row in &view.rows {
        let mark = if row.supported {
            SUPPORTED_MARK
        } else {
            UNSUPPORTED_MARK
        };
        let mut line = format!(
            "  {mark} {:<width$}  {:<5} {}",
            row.title,
            row.extension,
            row.icon.asset_path(),
        );
        match &row.outcome {
            FileOutcome::Pending => {}
            FileOutcome::Succeeded { .. } => line.push_str("  done"),
            FileOutcome::Failed { reason } => {
                line.push_str("  failed: ");
                line.push_str(reason);
            }
        }
        lines.push(line);
    }

    if !view.all_supported {
        let noun = if view.unsupported_count == 1 {
            "file"
        } else {
            "files"
        };
        lines.push(format!(
            "{} unsupported {noun}; {} accepts: {}",
            view.unsupported_count,
            view.task,
            view.task.allowed_extensions().join(", ")
        ));
    }
    lines
}

pub fn print_list(view: &ListView) {
    for line in list_lines(view) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docbatch_core::{BatchPrefs, BatchState};
    use std::path::PathBuf;

    #[test]
    fn empty_selection_shows_hint() {
        let state = BatchState::new(Task::Convert, Vec::new(), BatchPrefs::default());
        assert_eq!(list_lines(&state.view())[0], "You need to choose files");
    }

    #[test]
    fn rows_carry_markers_and_icons() {
        let state = BatchState::new(
            Task::Compress,
            vec![PathBuf::from("/d/scan.pdf"), PathBuf::from("/d/notes.txt")],
            BatchPrefs::default(),
        );
        let lines = list_lines(&state.view());

        assert_eq!(lines[0], "Compressing (2 files, level max)");
        assert!(lines[1].starts_with("  ● scan.pdf "));
        assert!(lines[1].ends_with("assets/svg/pdf.svg"));
        assert!(lines[2].starts_with("  ✗ notes.txt"));
        assert!(lines[2].ends_with("assets/svg/default.svg"));
        assert_eq!(lines[3], "1 unsupported file; compress accepts: pdf");
    }

    #[test]
    fn footer_counts_every_rejected_file() {
        let state = BatchState::new(
            Task::Convert,
            vec![
                PathBuf::from("/d/a.pdf"),
                PathBuf::from("/d/b.docx"),
                PathBuf::from("/d/c.txt"),
            ],
            BatchPrefs::default(),
        );
        let lines = list_lines(&state.view());
        assert_eq!(
            lines.last().map(String::as_str),
            Some("2 unsupported files; convert accepts: ppt, pptx, doc, docx, xls, xlsx")
        );
    }
}
