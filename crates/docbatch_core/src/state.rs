use std::path::PathBuf;

use crate::view_model::{BatchSummary, FileRowView, ListView};
use crate::{validate_selection, CompressionLevel, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPhase {
    /// Waiting for the user to submit.
    #[default]
    Idle,
    /// Last submission failed the support check; nothing was uploaded.
    Rejected,
    /// Files are being uploaded one at a time.
    Running,
    /// Every file has been attempted.
    Finished,
}

/// Preferences that shape the batch, read once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchPrefs {
    pub close_window: bool,
    pub move_to_trash: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FileOutcome {
    #[default]
    Pending,
    Succeeded {
        outputs: Vec<PathBuf>,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchState {
    task: Task,
    compression: CompressionLevel,
    prefs: BatchPrefs,
    selection: Vec<PathBuf>,
    outcomes: Vec<FileOutcome>,
    phase: BatchPhase,
    current: Option<usize>,
    dirty: bool,
}

impl BatchState {
    pub fn new(task: Task, selection: Vec<PathBuf>, prefs: BatchPrefs) -> Self {
        let outcomes = vec![FileOutcome::Pending; selection.len()];
        Self {
            task,
            compression: CompressionLevel::default(),
            prefs,
            selection,
            outcomes,
            phase: BatchPhase::Idle,
            current: None,
            dirty: false,
        }
    }

    pub fn with_compression(mut self, compression: CompressionLevel) -> Self {
        self.compression = compression;
        self
    }

    pub fn task(&self) -> Task {
        self.task
    }

    pub fn compression(&self) -> CompressionLevel {
        self.compression
    }

    pub fn prefs(&self) -> BatchPrefs {
        self.prefs
    }

    pub fn selection(&self) -> &[PathBuf] {
        &self.selection
    }

    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    pub fn phase(&self) -> BatchPhase {
        self.phase
    }

    /// Index of the file whose upload or trash move is in flight.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn view(&self) -> ListView {
        let report = validate_selection(&self.selection, self.task);
        let all_supported = report.all_supported();
        let unsupported_count = report.rejected();
        let rows = report
            .files
            .into_iter()
            .zip(self.outcomes.iter())
            .map(|(file, outcome)| FileRowView {
                title: file.file_name,
                extension: file.extension,
                icon: file.icon,
                supported: file.supported,
                outcome: outcome.clone(),
            })
            .collect();
        ListView {
            task: self.task,
            compression: self.compression,
            phase: self.phase,
            all_supported,
            unsupported_count,
            rows,
        }
    }

    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            total: self.outcomes.len(),
            ..BatchSummary::default()
        };
        for outcome in &self.outcomes {
            match outcome {
                FileOutcome::Pending => summary.pending += 1,
                FileOutcome::Succeeded { .. } => summary.succeeded += 1,
                FileOutcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }

    /// Returns whether anything changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_compression(&mut self, compression: CompressionLevel) {
        if self.compression != compression {
            self.compression = compression;
            self.dirty = true;
        }
    }

    pub(crate) fn reject(&mut self) {
        self.phase = BatchPhase::Rejected;
        self.current = None;
        self.dirty = true;
    }

    pub(crate) fn start(&mut self) {
        self.phase = BatchPhase::Running;
        self.current = Some(0);
        self.dirty = true;
    }

    pub(crate) fn set_current(&mut self, index: usize) {
        self.current = Some(index);
        self.dirty = true;
    }

    pub(crate) fn finish(&mut self) {
        self.phase = BatchPhase::Finished;
        self.current = None;
        self.dirty = true;
    }

    pub(crate) fn record(&mut self, index: usize, outcome: FileOutcome) {
        if let Some(slot) = self.outcomes.get_mut(index) {
            *slot = outcome;
            self.dirty = true;
        }
    }
}
