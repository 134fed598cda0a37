use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context};
use batch_logging::batch_info;
use clap::Parser;
use docbatch_core::{update, BatchPhase, BatchState, Msg, Task};
use docbatch_engine::{
    capture_selection, AppleScriptTrasher, BatchRunner, CloudConvertUploader, FinderSelection,
    SelectionSource, StaticSelection, UploadSettings,
};

use super::cli::Cli;
use super::notifier::TerminalNotifier;
use super::preferences::{self, Preferences};
use super::{logging, render};

pub fn run_app() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let level = batch_logging::parse_level(&cli.log_level)
        .ok_or_else(|| anyhow!("unknown log level '{}'", cli.log_level))?;
    logging::initialize(level, cli.log_file.as_deref());

    let prefs_path = cli.config.clone().or_else(preferences::default_path);
    let stored = prefs_path
        .as_deref()
        .map(preferences::load)
        .unwrap_or_default();
    let prefs = preferences::apply_overrides(stored, &cli);

    let session = Session {
        task: cli.command.task(),
        paths: cli.command.paths().to_vec(),
        list_only: cli.list,
        prefs_path,
        prefs,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    runtime.block_on(session.run())
}

struct Session {
    task: Task,
    paths: Vec<PathBuf>,
    list_only: bool,
    prefs_path: Option<PathBuf>,
    prefs: Preferences,
}

impl Session {
    async fn run(self) -> anyhow::Result<ExitCode> {
        let notifier = TerminalNotifier::new();

        let source: Box<dyn SelectionSource> = if self.paths.is_empty() {
            Box::new(FinderSelection::default())
        } else {
            Box::new(StaticSelection::new(self.paths.clone()))
        };
        let selection = capture_selection(source.as_ref(), &notifier).await;

        let mut state = BatchState::new(self.task, selection, self.prefs.batch_prefs());
        if let Some(level) = self.prefs.compression {
            state = update(state, Msg::CompressionChanged(level)).0;
        }

        let view = state.view();
        render::print_list(&view);
        if self.list_only {
            return Ok(exit_code(view.all_supported && !view.rows.is_empty()));
        }

        if self.prefs.api_key.trim().is_empty() {
            bail!(
                "no CloudConvert API key: set CLOUDCONVERT_API_KEY, pass --api-key, or add api_key to {}",
                self.prefs_path
                    .as_deref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "the preferences file".to_string())
            );
        }

        let settings = UploadSettings {
            output_dir: self.prefs.output_dir.clone(),
            download_results: self.prefs.download_results,
            ..UploadSettings::default()
        };
        let uploader =
            CloudConvertUploader::new(settings).context("failed to build the HTTP client")?;
        let trasher = AppleScriptTrasher::default();

        let runner = BatchRunner::new(self.prefs.api_key.clone(), &uploader, &trasher, &notifier);
        let state = runner.submit(state).await;
        notifier.finish();

        let summary = state.summary();
        batch_info!(
            "Batch ended in {:?}: {} succeeded, {} failed of {}",
            state.phase(),
            summary.succeeded,
            summary.failed,
            summary.total
        );
        if summary.failed > 0 {
            render::print_list(&state.view());
        }
        Ok(exit_code(
            state.phase() == BatchPhase::Finished && summary.failed == 0,
        ))
    }
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
