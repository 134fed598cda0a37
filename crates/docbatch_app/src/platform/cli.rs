use std::path::PathBuf;

use clap::{Parser, Subcommand};
use docbatch_core::{CompressionLevel, Task};

#[derive(Parser, Debug)]
#[command(
    name = "docbatch",
    version,
    about = "Send selected documents to CloudConvert for conversion or compression",
    long_about = "Converts Office documents to PDF or compresses PDF files through the CloudConvert API.\n\
                  Files are taken from the command line, or from the current Finder selection when none are given.\n\
                  Preferences are read from <config dir>/docbatch/preferences.ron unless --config is set."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Preferences file (RON).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// CloudConvert API key.
    #[arg(long, global = true, env = "CLOUDCONVERT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Clear the progress display and print a single line when done.
    #[arg(long, global = true, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub close_window: Option<bool>,

    /// Move each successfully processed original to the Trash.
    #[arg(long, global = true, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub move_to_trash: Option<bool>,

    /// Directory for downloaded results (default: next to each source file).
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Leave results on the server instead of downloading them.
    #[arg(long, global = true)]
    pub no_download: bool,

    /// Only list the files and whether they are supported.
    #[arg(long, global = true)]
    pub list: bool,

    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Also write logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert ppt, pptx, doc, docx, xls and xlsx files to PDF.
    Convert {
        paths: Vec<PathBuf>,
    },
    /// Compress PDF files.
    Compress {
        /// Profile: web, print, archive, scanned or max.
        #[arg(long)]
        level: Option<CompressionLevel>,
        paths: Vec<PathBuf>,
    },
}

impl Command {
    pub fn task(&self) -> Task {
        match self {
            Command::Convert { .. } => Task::Convert,
            Command::Compress { .. } => Task::Compress,
        }
    }

    pub fn level(&self) -> Option<CompressionLevel> {
        match self {
            Command::Convert { .. } => None,
            Command::Compress { level, .. } => *level,
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        match self {
            Command::Convert { paths } | Command::Compress { paths, .. } => paths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_accepts_level_and_paths() {
        let cli = Cli::try_parse_from([
            "docbatch",
            "compress",
            "--level",
            "print",
            "a.pdf",
            "b.pdf",
        ])
        .unwrap();
        assert_eq!(cli.command.task(), Task::Compress);
        assert_eq!(cli.command.level(), Some(CompressionLevel::Print));
        assert_eq!(cli.command.paths().len(), 2);
    }

    #[test]
    fn boolean_preferences_take_optional_values() {
        let cli = Cli::try_parse_from([
            "docbatch",
            "convert",
            "--move-to-trash",
            "--close-window=false",
            "deck.pptx",
        ])
        .unwrap();
        assert_eq!(cli.move_to_trash, Some(true));
        assert_eq!(cli.close_window, Some(false));
        assert_eq!(cli.command.paths(), &[PathBuf::from("deck.pptx")]);
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert!(Cli::try_parse_from(["docbatch", "compress", "--level", "tiny"]).is_err());
    }
}
