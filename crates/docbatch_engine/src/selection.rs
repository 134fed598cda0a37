use std::io;
use std::path::PathBuf;

use batch_logging::{batch_debug, batch_error};
use docbatch_core::Notification;
use thiserror::Error;

use crate::script::{run_osascript, ScriptError};
use crate::Notifier;

const FINDER_SELECTION_SCRIPT: &str = r#"set output to ""
tell application "Finder"
  repeat with selectedItem in (get selection)
    set output to output & POSIX path of (selectedItem as alias) & linefeed
  end repeat
end tell
return output"#;

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("could not read the Finder selection: {0}")]
    Script(#[from] ScriptError),
    #[error("{path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where the batch's files come from.
#[async_trait::async_trait]
pub trait SelectionSource: Send + Sync {
    async fn selected_paths(&self) -> Result<Vec<PathBuf>, SelectionError>;
}

/// Paths given up front (command line), resolved to absolute paths.
#[derive(Debug, Clone, Default)]
pub struct StaticSelection {
    paths: Vec<PathBuf>,
}

impl StaticSelection {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

#[async_trait::async_trait]
impl SelectionSource for StaticSelection {
    async fn selected_paths(&self) -> Result<Vec<PathBuf>, SelectionError> {
        let mut resolved = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let absolute = tokio::fs::canonicalize(path)
                .await
                .map_err(|source| SelectionError::Unreadable {
                    path: path.clone(),
                    source,
                })?;
            resolved.push(absolute);
        }
        Ok(resolved)
    }
}

/// Current Finder selection, read through AppleScript.
#[derive(Debug, Clone)]
pub struct FinderSelection {
    program: String,
}

impl Default for FinderSelection {
    fn default() -> Self {
        Self::new("osascript")
    }
}

impl FinderSelection {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait::async_trait]
impl SelectionSource for FinderSelection {
    async fn selected_paths(&self) -> Result<Vec<PathBuf>, SelectionError> {
        let output = run_osascript(&self.program, FINDER_SELECTION_SCRIPT).await?;
        let paths = parse_selection_output(&output);
        batch_debug!("Finder selection has {} item(s)", paths.len());
        Ok(paths)
    }
}

fn parse_selection_output(output: &str) -> Vec<PathBuf> {
    output
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Reads the selection once. A failure is shown as an error notification and
/// treated as an empty selection.
pub async fn capture_selection(
    source: &dyn SelectionSource,
    notifier: &dyn Notifier,
) -> Vec<PathBuf> {
    match source.selected_paths().await {
        Ok(paths) => paths,
        Err(err) => {
            batch_error!("Error retrieving selected files: {}", err);
            notifier.notify(&Notification::failure("Error", err.to_string()));
            Vec::new()
        }
    }
}
