/// Display icon for a file row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileIcon {
    Document,
    Presentation,
    Pdf,
    Default,
}

impl FileIcon {
    pub fn asset_path(self) -> &'static str {
        match self {
            FileIcon::Document => "assets/svg/doc.svg",
            FileIcon::Presentation => "assets/svg/ppt.svg",
            FileIcon::Pdf => "assets/svg/pdf.svg",
            FileIcon::Default => "assets/svg/default.svg",
        }
    }
}

/// Maps an extension to its icon; unknown extensions get the default icon.
pub fn resolve_icon(extension: &str) -> FileIcon {
    match extension {
        "doc" | "docx" => FileIcon::Document,
        "ppt" | "pptx" => FileIcon::Presentation,
        "pdf" => FileIcon::Pdf,
        _ => FileIcon::Default,
    }
}
