use crate::{
    validate_selection, BatchPhase, BatchState, Effect, FileOutcome, Msg, Notification,
};

/// HUD text shown after the window closes on a fully successful batch.
pub const FINAL_HUD_MESSAGE: &str = "Finished all, Have a nice day!";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: BatchState, msg: Msg) -> (BatchState, Vec<Effect>) {
    let effects = match msg {
        Msg::CompressionChanged(level) => {
            // The profile is captured by each upload effect; only the idle list may change it.
            if state.phase() == BatchPhase::Idle {
                state.set_compression(level);
            }
            Vec::new()
        }
        Msg::Submitted => match state.phase() {
            BatchPhase::Idle | BatchPhase::Rejected => submit(&mut state),
            BatchPhase::Running | BatchPhase::Finished => Vec::new(),
        },
        Msg::UploadDone { index, result } => {
            if !is_in_flight(&state, index) {
                return (state, Vec::new());
            }
            match result {
                Ok(outputs) => {
                    state.record(index, FileOutcome::Succeeded { outputs });
                    if state.prefs().move_to_trash {
                        vec![Effect::MoveToTrash {
                            index,
                            path: state.selection()[index].clone(),
                        }]
                    } else {
                        advance(&mut state, index)
                    }
                }
                Err(failure) => {
                    state.record(
                        index,
                        FileOutcome::Failed {
                            reason: failure.reason,
                        },
                    );
                    advance(&mut state, index)
                }
            }
        }
        Msg::TrashDone { index } => {
            let trashed = matches!(
                state.outcomes().get(index),
                Some(FileOutcome::Succeeded { .. })
            );
            if is_in_flight(&state, index) && trashed && state.prefs().move_to_trash {
                advance(&mut state, index)
            } else {
                Vec::new()
            }
        }
    };

    (state, effects)
}

fn is_in_flight(state: &BatchState, index: usize) -> bool {
    state.phase() == BatchPhase::Running && state.current() == Some(index)
}

fn submit(state: &mut BatchState) -> Vec<Effect> {
    let report = validate_selection(state.selection(), state.task());
    if report.is_empty() {
        state.reject();
        return vec![Effect::Notify(Notification::failure(
            "You need to choose files",
            "pdf, pptx, docx ....",
        ))];
    }
    if !report.all_supported() {
        state.reject();
        return vec![Effect::Notify(Notification::failure(
            "Unsupported file detected",
            "Please change your file to continue",
        ))];
    }

    state.start();
    let verb = state.task().verb();
    vec![
        Effect::Notify(Notification::animated(
            format!("{verb}..."),
            format!("your file is now being {verb}. This process may take some time."),
        )),
        upload_effect(state, 0),
    ]
}

fn upload_effect(state: &BatchState, index: usize) -> Effect {
    let path = state.selection()[index].clone();
    Effect::Upload {
        index,
        extension: crate::file_extension(&path),
        path,
        task: state.task(),
        compression: state.compression(),
    }
}

/// Reports progress for `index` and moves on to the next file or completion.
fn advance(state: &mut BatchState, index: usize) -> Vec<Effect> {
    let total = state.selection().len();
    let mut effects = vec![Effect::Notify(Notification::animated(
        format!("{}...", state.task().verb()),
        format!("Finished {} / {}", index + 1, total),
    ))];

    let next = index + 1;
    if next < total {
        state.set_current(next);
        effects.push(upload_effect(state, next));
    } else {
        state.finish();
        effects.extend(completion_effects(state));
    }
    effects
}

fn completion_effects(state: &BatchState) -> Vec<Effect> {
    let summary = state.summary();
    if state.prefs().close_window {
        let hud = if summary.failed == 0 {
            FINAL_HUD_MESSAGE.to_string()
        } else {
            format!(
                "Finished with {} of {} files failed",
                summary.failed, summary.total
            )
        };
        return vec![Effect::CloseWindow, Effect::ShowHud(hud)];
    }

    let notification = if summary.failed == 0 {
        Notification::success("Finished all", "Have a nice day!")
    } else {
        Notification::failure(
            "Finished with errors",
            format!("{} of {} files failed", summary.failed, summary.total),
        )
    };
    vec![Effect::Notify(notification)]
}
