use std::path::Path;

use batch_logging::{batch_error, batch_info};

use crate::script::{quote_applescript, run_osascript};

/// Best-effort removal of a processed original.
#[async_trait::async_trait]
pub trait Trasher: Send + Sync {
    /// Never fails: problems are logged and swallowed so the batch keeps going.
    async fn move_to_trash(&self, path: &Path);
}

/// Asks Finder to move the file to the trash via AppleScript.
#[derive(Debug, Clone)]
pub struct AppleScriptTrasher {
    program: String,
}

impl Default for AppleScriptTrasher {
    fn default() -> Self {
        Self::new("osascript")
    }
}

impl AppleScriptTrasher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

pub fn trash_script(path: &Path) -> String {
    format!(
        "set posixFile to POSIX file {}\ntell application \"Finder\"\n  move posixFile to trash\nend tell",
        quote_applescript(&path.to_string_lossy())
    )
}

#[async_trait::async_trait]
impl Trasher for AppleScriptTrasher {
    async fn move_to_trash(&self, path: &Path) {
        match run_osascript(&self.program, &trash_script(path)).await {
            Ok(result) => batch_info!("Moved {:?} to Trash {}", path, result),
            Err(err) => batch_error!("Error moving {:?} to Trash: {}", path, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_targets_posix_file() {
        let script = trash_script(Path::new("/Users/me/Report \"final\".docx"));
        assert_eq!(
            script,
            "set posixFile to POSIX file \"/Users/me/Report \\\"final\\\".docx\"\n\
             tell application \"Finder\"\n  move posixFile to trash\nend tell"
        );
    }
}
