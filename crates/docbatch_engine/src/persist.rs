use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use docbatch_core::Task;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Resolves `dir` to an absolute canonical path, creating it first if needed.
pub fn resolve_output_dir(dir: &Path) -> Result<PathBuf, PersistError> {
    ensure_output_dir(dir)?;
    fs::canonicalize(dir).map_err(|e| PersistError::OutputDir(e.to_string()))
}

/// Highest numeric suffix tried before giving up on a free name.
const MAX_NAME_ATTEMPTS: usize = 1000;

/// Atomically write content into `dir` by writing a temp file then linking it
/// into place. Existing files are never replaced: a taken name gets a `-N`
/// suffix on its stem.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let target = self.dir.join(numbered_name(filename, attempt));
            match tmp.persist_noclobber(&target) {
                Ok(_) => return Ok(target),
                Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => tmp = err.file,
                Err(err) => return Err(PersistError::Io(err.error)),
            }
        }
        Err(PersistError::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free name for {filename} in {:?}", self.dir),
        )))
    }
}

fn numbered_name(filename: &str, attempt: usize) -> String {
    if attempt == 0 {
        return filename.to_string();
    }
    with_stem_suffix(filename, &attempt.to_string())
}

fn with_stem_suffix(name: &str, suffix: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-{suffix}.{ext}"),
        _ => format!("{name}-{suffix}"),
    }
}

/// Local name for a downloaded result.
///
/// The exported name is reduced to a safe file name; if it would land on the
/// source file itself, a `-converted`/`-compressed` suffix is added to the stem.
/// `source` and `dir` must both be canonical.
pub fn output_file_name(source: &Path, dir: &Path, exported: &str, task: Task) -> String {
    let name = sanitize(exported);
    if dir.join(&name) != source {
        return name;
    }
    let suffix = match task {
        Task::Convert => "converted",
        Task::Compress => "compressed",
    };
    with_stem_suffix(&name, suffix)
}

fn sanitize(input: &str) -> String {
    // Servers may hand back a path; keep only the last component.
    let last = input.rsplit(['/', '\\']).next().unwrap_or(input);
    let cleaned: String = last
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&[' ', '.'][..]);
    if cleaned.is_empty() {
        "output".to_string()
    } else {
        cleaned.to_string()
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c, ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_exported_name_when_distinct() {
        let name = output_file_name(
            Path::new("/docs/deck.pptx"),
            Path::new("/docs"),
            "deck.pdf",
            Task::Convert,
        );
        assert_eq!(name, "deck.pdf");
    }

    #[test]
    fn suffixes_name_that_would_overwrite_source() {
        let name = output_file_name(
            Path::new("/docs/scan.pdf"),
            Path::new("/docs"),
            "scan.pdf",
            Task::Compress,
        );
        assert_eq!(name, "scan-compressed.pdf");
    }

    #[test]
    fn numbered_names_keep_the_extension() {
        assert_eq!(numbered_name("deck.pdf", 0), "deck.pdf");
        assert_eq!(numbered_name("deck.pdf", 2), "deck-2.pdf");
        assert_eq!(numbered_name("README", 1), "README-1");
        assert_eq!(numbered_name(".hidden", 1), ".hidden-1");
    }

    #[test]
    fn strips_directories_and_forbidden_characters() {
        assert_eq!(sanitize("../../etc/passwd"), "passwd");
        assert_eq!(sanitize("a:b?.pdf"), "a_b_.pdf");
        assert_eq!(sanitize(".."), "output");
    }
}
