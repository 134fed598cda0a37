use crate::{BatchPhase, CompressionLevel, FileIcon, FileOutcome, Task};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub task: Task,
    pub compression: CompressionLevel,
    pub phase: BatchPhase,
    pub all_supported: bool,
    /// Files the support gate turned away.
    pub unsupported_count: usize,
    pub rows: Vec<FileRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub title: String,
    pub extension: String,
    pub icon: FileIcon,
    pub supported: bool,
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub pending: usize,
}
