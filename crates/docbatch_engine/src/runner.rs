use std::collections::VecDeque;

use batch_logging::{batch_info, batch_warn};
use docbatch_core::{update, BatchState, Effect, Msg, UploadFailure};

use crate::upload::{LogProgressSink, ProgressSink, TaskUploader};
use crate::{Notifier, Trasher, UploadRequest};

static LOG_SINK: LogProgressSink = LogProgressSink;

/// Executes the effects produced by the core update function, one at a time,
/// feeding each result back into the state machine.
pub struct BatchRunner<'a> {
    api_key: String,
    uploader: &'a dyn TaskUploader,
    trasher: &'a dyn Trasher,
    notifier: &'a dyn Notifier,
    sink: &'a dyn ProgressSink,
}

impl<'a> BatchRunner<'a> {
    pub fn new(
        api_key: impl Into<String>,
        uploader: &'a dyn TaskUploader,
        trasher: &'a dyn Trasher,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            uploader,
            trasher,
            notifier,
            sink: &LOG_SINK,
        }
    }

    pub fn with_progress_sink(mut self, sink: &'a dyn ProgressSink) -> Self {
        self.sink = sink;
        self
    }

    /// Submits the batch and runs it to completion (or rejection).
    pub async fn submit(&self, state: BatchState) -> BatchState {
        self.dispatch(state, Msg::Submitted).await
    }

    /// Applies `msg` and drains every effect that follows from it.
    pub async fn dispatch(&self, state: BatchState, msg: Msg) -> BatchState {
        let (mut state, effects) = update(state, msg);
        let mut queue: VecDeque<Effect> = effects.into();

        while let Some(effect) = queue.pop_front() {
            if let Some(msg) = self.execute(effect).await {
                let (next, more) = update(state, msg);
                state = next;
                queue.extend(more);
            }
        }
        state
    }

    async fn execute(&self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::Notify(notification) => {
                self.notifier.notify(&notification);
                None
            }
            Effect::Upload {
                index,
                path,
                task,
                extension,
                compression,
            } => {
                batch_info!("Uploading #{} {:?} task={} ext={}", index, path, task, extension);
                let request = UploadRequest {
                    api_key: self.api_key.clone(),
                    path,
                    task,
                    extension,
                    compression,
                };
                let result = match self.uploader.execute(&request, self.sink).await {
                    Ok(output) => {
                        batch_info!("Job {} finished for {:?}", output.job_id, request.path);
                        Ok(output.saved_files)
                    }
                    Err(err) => {
                        batch_warn!("Upload of {:?} failed: {}", request.path, err);
                        Err(UploadFailure::new(err.to_string()))
                    }
                };
                Some(Msg::UploadDone { index, result })
            }
            Effect::MoveToTrash { index, path } => {
                self.trasher.move_to_trash(&path).await;
                Some(Msg::TrashDone { index })
            }
            Effect::CloseWindow => {
                self.notifier.close_window();
                None
            }
            Effect::ShowHud(message) => {
                self.notifier.show_hud(&message);
                None
            }
        }
    }
}
