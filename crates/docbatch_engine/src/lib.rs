//! Docbatch engine: remote uploads, host scripting and effect execution.
mod api;
mod notify;
mod persist;
mod runner;
mod script;
mod selection;
mod trash;
mod types;
mod upload;

pub use notify::Notifier;
pub use persist::{
    ensure_output_dir, output_file_name, resolve_output_dir, AtomicFileWriter, PersistError,
};
pub use runner::BatchRunner;
pub use script::{quote_applescript, ScriptError};
pub use selection::{
    capture_selection, FinderSelection, SelectionError, SelectionSource, StaticSelection,
};
pub use trash::{trash_script, AppleScriptTrasher, Trasher};
pub use types::{FailureKind, UploadError, UploadEvent, UploadOutput, UploadRequest, UploadStage};
pub use upload::{CloudConvertUploader, LogProgressSink, ProgressSink, TaskUploader, UploadSettings};
