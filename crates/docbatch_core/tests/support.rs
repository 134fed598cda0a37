use std::path::PathBuf;

use docbatch_core::{resolve_icon, validate_selection, FileIcon, SupportGate, Task};

#[test]
fn unsupported_extensions_close_the_gate_once_per_file() {
    let mut gate = SupportGate::new();

    assert!(!gate.check("txt", Task::Compress));
    assert!(!gate.check("docx", Task::Compress));
    assert!(!gate.is_open());
    assert_eq!(gate.rejections(), 2);
}

#[test]
fn supported_extensions_leave_the_gate_open() {
    let mut gate = SupportGate::new();
    for ext in ["ppt", "pptx", "doc", "docx", "xls", "xlsx"] {
        assert!(gate.check(ext, Task::Convert), "{ext} should convert");
    }
    assert!(gate.check("pdf", Task::Compress));
    assert!(gate.is_open());
    assert_eq!(gate.rejections(), 0);
}

#[test]
fn gate_never_reopens() {
    let mut gate = SupportGate::new();
    assert!(!gate.check("PDF", Task::Compress));
    assert!(gate.check("pdf", Task::Compress));
    assert!(!gate.is_open());
}

#[test]
fn validation_reports_each_file_in_order() {
    let paths: Vec<PathBuf> = vec!["/docs/a.pdf".into(), "/docs/b.txt".into()];
    let report = validate_selection(&paths, Task::Compress);

    assert!(!report.all_supported());
    let verdicts: Vec<_> = report
        .files
        .iter()
        .map(|f| (f.file_name.as_str(), f.extension.as_str(), f.supported))
        .collect();
    assert_eq!(verdicts, vec![("a.pdf", "pdf", true), ("b.txt", "txt", false)]);
    let unsupported: Vec<_> = report.unsupported().map(|f| f.path.clone()).collect();
    assert_eq!(unsupported, vec![PathBuf::from("/docs/b.txt")]);
}

#[test]
fn empty_selection_is_vacuously_supported() {
    let report = validate_selection(&[], Task::Convert);
    assert!(report.is_empty());
    assert!(report.all_supported());
}

#[test]
fn icons_follow_extension_families() {
    assert_eq!(resolve_icon("doc"), FileIcon::Document);
    assert_eq!(resolve_icon("docx").asset_path(), "assets/svg/doc.svg");
    assert_eq!(resolve_icon("ppt").asset_path(), "assets/svg/ppt.svg");
    assert_eq!(resolve_icon("pptx"), FileIcon::Presentation);
    assert_eq!(resolve_icon("pdf").asset_path(), "assets/svg/pdf.svg");
    assert_eq!(resolve_icon("xlsx"), FileIcon::Default);
    assert_eq!(resolve_icon("").asset_path(), "assets/svg/default.svg");
}
