use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const CONVERT_EXTENSIONS: &[&str] = &["ppt", "pptx", "doc", "docx", "xls", "xlsx"];
const COMPRESS_EXTENSIONS: &[&str] = &["pdf"];

/// Operation requested on a batch of files. Fixed for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    Convert,
    Compress,
}

impl Task {
    /// Lowercase extensions accepted for this task.
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            Task::Convert => CONVERT_EXTENSIONS,
            Task::Compress => COMPRESS_EXTENSIONS,
        }
    }

    /// Case-sensitive membership test against the allow-list.
    pub fn supports(self, extension: &str) -> bool {
        self.allowed_extensions().contains(&extension)
    }

    /// Progressive verb used in notifications ("Converting", "Compressing").
    pub fn verb(self) -> &'static str {
        match self {
            Task::Convert => "Converting",
            Task::Compress => "Compressing",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Task::Convert => "convert",
            Task::Compress => "compress",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quality profile for the compress task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    Web,
    Print,
    Archive,
    Scanned,
    #[default]
    Max,
}

impl CompressionLevel {
    pub const ALL: [CompressionLevel; 5] = [
        CompressionLevel::Web,
        CompressionLevel::Print,
        CompressionLevel::Archive,
        CompressionLevel::Scanned,
        CompressionLevel::Max,
    ];

    /// Profile name understood by the remote optimizer.
    pub fn as_str(self) -> &'static str {
        match self {
            CompressionLevel::Web => "web",
            CompressionLevel::Print => "print",
            CompressionLevel::Archive => "archive",
            CompressionLevel::Scanned => "scanned",
            CompressionLevel::Max => "max",
        }
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompressionLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| format!("unknown compression level '{s}'"))
    }
}

/// Last path component as displayed to the user; empty when there is none.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Suffix after the last `.` of the file name, or `""` when the name has no dot.
pub fn file_extension(path: &Path) -> String {
    let name = file_name(path);
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_text_after_last_dot() {
        assert_eq!(file_extension(Path::new("/tmp/report.final.docx")), "docx");
        assert_eq!(file_extension(Path::new("/tmp/.bashrc")), "bashrc");
        assert_eq!(file_extension(Path::new("/tmp/README")), "");
        assert_eq!(file_extension(Path::new("/tmp/trailing.")), "");
    }

    #[test]
    fn extension_keeps_case() {
        assert_eq!(file_extension(Path::new("Slides.PPTX")), "PPTX");
        assert!(!Task::Convert.supports("PPTX"));
    }

    #[test]
    fn compression_level_parses_profile_names() {
        assert_eq!("print".parse::<CompressionLevel>(), Ok(CompressionLevel::Print));
        assert!("Max".parse::<CompressionLevel>().is_err());
        assert_eq!(CompressionLevel::default(), CompressionLevel::Max);
    }
}
