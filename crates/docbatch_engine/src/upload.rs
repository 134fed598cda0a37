use std::path::{Path, PathBuf};
use std::time::Duration;

use batch_logging::{batch_debug, batch_info};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::api::{job_payload, ApiErrorBody, Envelope, Job};
use crate::persist::{output_file_name, resolve_output_dir, AtomicFileWriter};
use crate::{FailureKind, UploadError, UploadEvent, UploadOutput, UploadRequest, UploadStage};

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub api_base: String,
    /// Host serving the blocking "wait for job" endpoint.
    pub sync_api_base: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Target format for the convert task.
    pub output_format: String,
    /// How many times to call the wait endpoint before giving up.
    pub max_wait_rounds: usize,
    pub download_results: bool,
    /// Where results go; `None` writes next to the source file.
    pub output_dir: Option<PathBuf>,
    pub max_download_bytes: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.cloudconvert.com".to_string(),
            sync_api_base: "https://sync.api.cloudconvert.com".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
            output_format: "pdf".to_string(),
            max_wait_rounds: 10,
            download_results: true,
            output_dir: None,
            max_download_bytes: 512 * 1024 * 1024,
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: UploadEvent);
}

/// Sink that only logs stage changes.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgressSink;

impl ProgressSink for LogProgressSink {
    fn emit(&self, event: UploadEvent) {
        batch_debug!(
            "{:?} stage={:?} bytes={:?}",
            event.path,
            event.stage,
            event.bytes
        );
    }
}

/// Submits one file to the remote service and waits for the result.
#[async_trait::async_trait]
pub trait TaskUploader: Send + Sync {
    async fn execute(
        &self,
        request: &UploadRequest,
        sink: &dyn ProgressSink,
    ) -> Result<UploadOutput, UploadError>;
}

#[derive(Debug, Clone)]
pub struct CloudConvertUploader {
    settings: UploadSettings,
    client: reqwest::Client,
}

impl CloudConvertUploader {
    pub fn new(settings: UploadSettings) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| UploadError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn create_job(&self, request: &UploadRequest) -> Result<Job, UploadError> {
        let payload = job_payload(
            request.task,
            &request.extension,
            request.compression,
            &self.settings.output_format,
        );
        let response = self
            .client
            .post(format!("{}/v2/jobs", self.settings.api_base))
            .bearer_auth(&request.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_envelope(response).await
    }

    async fn upload_file(&self, job: &Job, path: &Path) -> Result<u64, UploadError> {
        let form_spec = job.upload_form().ok_or_else(|| {
            UploadError::new(
                FailureKind::InvalidResponse,
                format!("job {} has no upload form", job.id),
            )
        })?;

        let content = tokio::fs::read(path)
            .await
            .map_err(|err| UploadError::new(FailureKind::Io, format!("{path:?}: {err}")))?;
        let len = content.len() as u64;

        // Signed form fields must precede the file part.
        let mut form = Form::new();
        for (key, value) in form_spec.fields() {
            form = form.text(key, value);
        }
        let part = Part::bytes(content).file_name(docbatch_core::file_name(path));
        form = form.part("file", part);

        let response = self
            .client
            .post(&form_spec.url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(status_error(response).await);
        }
        Ok(len)
    }

    async fn wait_for_job(&self, job_id: &str, api_key: &str) -> Result<Job, UploadError> {
        let url = format!("{}/v2/jobs/{}", self.settings.sync_api_base, job_id);
        for round in 1..=self.settings.max_wait_rounds.max(1) {
            let response = self
                .client
                .get(&url)
                .bearer_auth(api_key)
                .send()
                .await
                .map_err(map_reqwest_error)?;
            let job: Job = read_envelope(response).await?;
            match job.status.as_str() {
                "finished" => return Ok(job),
                "error" => {
                    return Err(UploadError::new(
                        FailureKind::JobFailed,
                        job.failure_message(),
                    ))
                }
                other => batch_debug!("Job {} still {} after wait round {}", job_id, other, round),
            }
        }
        Err(UploadError::new(
            FailureKind::Timeout,
            format!("job {job_id} did not finish"),
        ))
    }

    async fn download_results(
        &self,
        job: &Job,
        request: &UploadRequest,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<PathBuf>, UploadError> {
        let requested = match &self.settings.output_dir {
            Some(dir) => dir.clone(),
            None => request
                .path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        let dir = resolve_output_dir(&requested)
            .map_err(|err| UploadError::new(FailureKind::Io, format!("{requested:?}: {err}")))?;
        let source = tokio::fs::canonicalize(&request.path)
            .await
            .map_err(|err| UploadError::new(FailureKind::Io, format!("{:?}: {err}", request.path)))?;
        let writer = AtomicFileWriter::new(dir.clone());

        let mut saved = Vec::new();
        for file in job.exported_files() {
            let Some(url) = file.url.as_deref() else {
                continue;
            };
            let bytes = self.fetch_bytes(url, request, sink).await?;
            let name = output_file_name(&source, &dir, &file.filename, request.task);
            let target = writer
                .write(&name, &bytes)
                .map_err(|err| UploadError::new(FailureKind::Io, err.to_string()))?;
            batch_info!("Saved {:?} ({} bytes)", target, bytes.len());
            saved.push(target);
        }
        Ok(saved)
    }

    async fn fetch_bytes(
        &self,
        url: &str,
        request: &UploadRequest,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<u8>, UploadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let max_bytes = self.settings.max_download_bytes;
        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if bytes.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(UploadError::new(
                    FailureKind::InvalidResponse,
                    format!("result larger than {max_bytes} bytes"),
                ));
            }
            bytes.extend_from_slice(&chunk);
            sink.emit(UploadEvent {
                path: request.path.clone(),
                stage: UploadStage::Downloading,
                bytes: Some(bytes.len() as u64),
            });
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl TaskUploader for CloudConvertUploader {
    async fn execute(
        &self,
        request: &UploadRequest,
        sink: &dyn ProgressSink,
    ) -> Result<UploadOutput, UploadError> {
        let stage = |stage: UploadStage, bytes: Option<u64>| UploadEvent {
            path: request.path.clone(),
            stage,
            bytes,
        };

        sink.emit(stage(UploadStage::CreatingJob, None));
        let job = self.create_job(request).await?;
        batch_debug!("Created job {} for {:?}", job.id, request.path);

        sink.emit(stage(UploadStage::Uploading, Some(0)));
        let sent = self.upload_file(&job, &request.path).await?;
        sink.emit(stage(UploadStage::Uploading, Some(sent)));

        sink.emit(stage(UploadStage::Processing, None));
        let finished = self.wait_for_job(&job.id, &request.api_key).await?;

        let saved_files = if self.settings.download_results {
            self.download_results(&finished, request, sink).await?
        } else {
            Vec::new()
        };

        sink.emit(stage(UploadStage::Done, None));
        Ok(UploadOutput {
            job_id: finished.id,
            saved_files,
        })
    }
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T, UploadError> {
    if !response.status().is_success() {
        return Err(status_error(response).await);
    }
    let body = response.text().await.map_err(map_reqwest_error)?;
    serde_json::from_str::<Envelope<T>>(&body)
        .map(|envelope| envelope.data)
        .map_err(|err| UploadError::new(FailureKind::InvalidResponse, err.to_string()))
}

async fn status_error(response: Response) -> UploadError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| status.to_string());
    UploadError::new(failure_for_status(status), message)
}

fn failure_for_status(status: StatusCode) -> FailureKind {
    match status.as_u16() {
        401 | 403 => FailureKind::Unauthorized,
        402 => FailureKind::QuotaExceeded,
        422 => FailureKind::UnsupportedFormat,
        429 => FailureKind::RateLimited,
        code => FailureKind::HttpStatus(code),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> UploadError {
    if err.is_timeout() {
        return UploadError::new(FailureKind::Timeout, err.to_string());
    }
    UploadError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_failure_kinds() {
        assert_eq!(
            failure_for_status(StatusCode::UNAUTHORIZED),
            FailureKind::Unauthorized
        );
        assert_eq!(
            failure_for_status(StatusCode::PAYMENT_REQUIRED),
            FailureKind::QuotaExceeded
        );
        assert_eq!(
            failure_for_status(StatusCode::UNPROCESSABLE_ENTITY),
            FailureKind::UnsupportedFormat
        );
        assert_eq!(
            failure_for_status(StatusCode::TOO_MANY_REQUESTS),
            FailureKind::RateLimited
        );
        assert_eq!(
            failure_for_status(StatusCode::BAD_GATEWAY),
            FailureKind::HttpStatus(502)
        );
    }
}
