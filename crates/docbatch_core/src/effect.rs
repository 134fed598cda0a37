use std::path::PathBuf;

use crate::{CompressionLevel, Notification, Task};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify(Notification),
    Upload {
        index: usize,
        path: PathBuf,
        task: Task,
        extension: String,
        compression: CompressionLevel,
    },
    MoveToTrash {
        index: usize,
        path: PathBuf,
    },
    CloseWindow,
    ShowHud(String),
}
