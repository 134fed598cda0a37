use std::fmt;
use std::path::PathBuf;

use docbatch_core::{CompressionLevel, Task};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    CreatingJob,
    Uploading,
    Processing,
    Downloading,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEvent {
    pub path: PathBuf,
    pub stage: UploadStage,
    pub bytes: Option<u64>,
}

/// Everything the uploader needs to process one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub api_key: String,
    pub path: PathBuf,
    pub task: Task,
    pub extension: String,
    pub compression: CompressionLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutput {
    pub job_id: String,
    /// Result files written locally; empty when downloads are disabled.
    pub saved_files: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct UploadError {
    pub kind: FailureKind,
    pub message: String,
}

impl UploadError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Io,
    InvalidResponse,
    Unauthorized,
    QuotaExceeded,
    UnsupportedFormat,
    RateLimited,
    HttpStatus(u16),
    Timeout,
    Network,
    JobFailed,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Io => write!(f, "file error"),
            FailureKind::InvalidResponse => write!(f, "invalid api response"),
            FailureKind::Unauthorized => write!(f, "api key rejected"),
            FailureKind::QuotaExceeded => write!(f, "conversion quota exceeded"),
            FailureKind::UnsupportedFormat => write!(f, "format not accepted"),
            FailureKind::RateLimited => write!(f, "rate limited"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::JobFailed => write!(f, "job failed"),
        }
    }
}
