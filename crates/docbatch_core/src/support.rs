use std::path::{Path, PathBuf};

use crate::icon::{resolve_icon, FileIcon};
use crate::task::{file_extension, file_name, Task};

/// Session-scoped record of whether every checked extension was supported.
///
/// Starts open; the first unsupported extension closes it and nothing reopens it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportGate {
    open: bool,
    rejections: usize,
}

impl Default for SupportGate {
    fn default() -> Self {
        Self {
            open: true,
            rejections: 0,
        }
    }
}

impl SupportGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `task` accepts `extension`, closing the gate if not.
    pub fn check(&mut self, extension: &str, task: Task) -> bool {
        let supported = task.supports(extension);
        if !supported {
            self.open = false;
            self.rejections += 1;
        }
        supported
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Number of `check` calls that found an unsupported extension.
    pub fn rejections(&self) -> usize {
        self.rejections
    }
}

/// Support verdict for one selected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSupport {
    pub path: PathBuf,
    pub file_name: String,
    pub extension: String,
    pub icon: FileIcon,
    pub supported: bool,
}

/// Result of validating a whole selection against a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionReport {
    pub task: Task,
    pub files: Vec<FileSupport>,
    gate: SupportGate,
}

impl SelectionReport {
    pub fn all_supported(&self) -> bool {
        self.gate.is_open()
    }

    /// How many files the gate rejected.
    pub fn rejected(&self) -> usize {
        self.gate.rejections()
    }

    pub fn unsupported(&self) -> impl Iterator<Item = &FileSupport> {
        self.files.iter().filter(|file| !file.supported)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Checks every path in selection order. Pure; safe to call at submission time.
pub fn validate_selection(paths: &[PathBuf], task: Task) -> SelectionReport {
    let mut gate = SupportGate::new();
    let files = paths
        .iter()
        .map(|path| describe(path, task, &mut gate))
        .collect();
    SelectionReport { task, files, gate }
}

fn describe(path: &Path, task: Task, gate: &mut SupportGate) -> FileSupport {
    let extension = file_extension(path);
    let supported = gate.check(&extension, task);
    FileSupport {
        path: path.to_path_buf(),
        file_name: file_name(path),
        icon: resolve_icon(&extension),
        extension,
        supported,
    }
}
