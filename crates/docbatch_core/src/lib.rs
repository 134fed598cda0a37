//! Docbatch core: pure batch state machine, support tables and view-model helpers.
mod effect;
mod icon;
mod msg;
mod notification;
mod state;
mod support;
mod task;
mod update;
mod view_model;

pub use effect::Effect;
pub use icon::{resolve_icon, FileIcon};
pub use msg::{Msg, UploadFailure};
pub use notification::{Notification, ToastStyle};
pub use state::{BatchPhase, BatchPrefs, BatchState, FileOutcome};
pub use support::{validate_selection, FileSupport, SelectionReport, SupportGate};
pub use task::{file_extension, file_name, CompressionLevel, Task};
pub use update::{update, FINAL_HUD_MESSAGE};
pub use view_model::{BatchSummary, FileRowView, ListView};
