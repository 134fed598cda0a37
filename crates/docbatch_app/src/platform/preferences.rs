use std::fs;
use std::path::{Path, PathBuf};

use batch_logging::{batch_info, batch_warn};
use docbatch_core::{BatchPrefs, CompressionLevel};
use serde::{Deserialize, Serialize};

use super::cli::Cli;

const PREFERENCES_DIR: &str = "docbatch";
const PREFERENCES_FILENAME: &str = "preferences.ron";

/// Session configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub api_key: String,
    pub close_window: bool,
    pub move_to_trash: bool,
    pub compression: Option<CompressionLevel>,
    pub output_dir: Option<PathBuf>,
    pub download_results: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            close_window: false,
            move_to_trash: false,
            compression: None,
            output_dir: None,
            download_results: true,
        }
    }
}

impl Preferences {
    pub fn batch_prefs(&self) -> BatchPrefs {
        BatchPrefs {
            close_window: self.close_window,
            move_to_trash: self.move_to_trash,
        }
    }
}

pub(crate) fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(PREFERENCES_DIR).join(PREFERENCES_FILENAME))
}

/// Reads preferences from `path`. A missing or malformed file yields defaults.
pub(crate) fn load(path: &Path) -> Preferences {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Preferences::default();
        }
        Err(err) => {
            batch_warn!("Failed to read preferences from {:?}: {}", path, err);
            return Preferences::default();
        }
    };

    match ron::from_str(&content) {
        Ok(prefs) => {
            batch_info!("Loaded preferences from {:?}", path);
            prefs
        }
        Err(err) => {
            batch_warn!("Failed to parse preferences from {:?}: {}", path, err);
            Preferences::default()
        }
    }
}

/// Command-line values win over the file.
pub(crate) fn apply_overrides(mut prefs: Preferences, cli: &Cli) -> Preferences {
    if let Some(key) = cli.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty()) {
        prefs.api_key = key.to_string();
    }
    if let Some(close_window) = cli.close_window {
        prefs.close_window = close_window;
    }
    if let Some(move_to_trash) = cli.move_to_trash {
        prefs.move_to_trash = move_to_trash;
    }
    if let Some(level) = cli.command.level() {
        prefs.compression = Some(level);
    }
    if let Some(dir) = &cli.output_dir {
        prefs.output_dir = Some(dir.clone());
    }
    if cli.no_download {
        prefs.download_results = false;
    }
    prefs
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let prefs = load(&temp.path().join("absent.ron"));
        assert_eq!(prefs, Preferences::default());
        assert!(prefs.download_results);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(PREFERENCES_FILENAME);
        fs::write(
            &path,
            r#"(api_key: "abc123", move_to_trash: true, compression: Some(print))"#,
        )
        .unwrap();

        let prefs = load(&path);
        assert_eq!(prefs.api_key, "abc123");
        assert!(prefs.move_to_trash);
        assert!(!prefs.close_window);
        assert_eq!(prefs.compression, Some(CompressionLevel::Print));
        assert!(prefs.download_results);
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(PREFERENCES_FILENAME);
        fs::write(&path, "(api_key: ").unwrap();
        assert_eq!(load(&path), Preferences::default());
    }

    #[test]
    fn saved_preferences_round_trip_through_ron() {
        let prefs = Preferences {
            api_key: "k".to_string(),
            close_window: true,
            output_dir: Some(PathBuf::from("/tmp/out")),
            ..Preferences::default()
        };
        let text = ron::ser::to_string_pretty(&prefs, ron::ser::PrettyConfig::new()).unwrap();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(PREFERENCES_FILENAME);
        fs::write(&path, text).unwrap();
        assert_eq!(load(&path), prefs);
    }

    #[test]
    fn cli_overrides_file_values() {
        let cli = Cli::try_parse_from([
            "docbatch",
            "compress",
            "--api-key",
            "from-cli",
            "--close-window",
            "--move-to-trash=false",
            "--level",
            "web",
            "--no-download",
            "a.pdf",
        ])
        .unwrap();
        let stored = Preferences {
            api_key: "from-file".to_string(),
            move_to_trash: true,
            ..Preferences::default()
        };

        let prefs = apply_overrides(stored, &cli);
        assert_eq!(prefs.api_key, "from-cli");
        assert!(prefs.close_window);
        assert!(!prefs.move_to_trash);
        assert_eq!(prefs.compression, Some(CompressionLevel::Web));
        assert!(!prefs.download_results);
        assert_eq!(
            prefs.batch_prefs(),
            BatchPrefs {
                close_window: true,
                move_to_trash: false
            }
        );
    }
}
