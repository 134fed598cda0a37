use std::path::PathBuf;

/// Why a single file's upload did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub reason: String,
}

impl UploadFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked another compression profile from the dropdown.
    CompressionChanged(crate::CompressionLevel),
    /// User triggered the submit action on the file list.
    Submitted,
    /// Uploader returned for the file at `index`; `Ok` carries any files written locally.
    UploadDone {
        index: usize,
        result: Result<Vec<PathBuf>, UploadFailure>,
    },
    /// Trash move for the file at `index` returned. Best effort, so no outcome.
    TrashDone { index: usize },
}
