//! CloudConvert v2 request bodies and response shapes.

use docbatch_core::{CompressionLevel, Task};
use serde::Deserialize;
use serde_json::{json, Value};

pub(crate) const IMPORT_TASK: &str = "import-file";
pub(crate) const PROCESS_TASK: &str = "process-file";
pub(crate) const EXPORT_TASK: &str = "export-file";

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Job {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub tasks: Vec<JobTask>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobTask {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<TaskResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TaskResult {
    #[serde(default)]
    pub form: Option<UploadForm>,
    #[serde(default)]
    pub files: Vec<ExportedFile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadForm {
    pub url: String,
    #[serde(default)]
    pub parameters: serde_json::Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExportedFile {
    pub filename: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl Job {
    pub fn task(&self, name: &str) -> Option<&JobTask> {
        self.tasks.iter().find(|task| task.name == name)
    }

    pub fn upload_form(&self) -> Option<&UploadForm> {
        self.task(IMPORT_TASK)?.result.as_ref()?.form.as_ref()
    }

    pub fn exported_files(&self) -> Vec<&ExportedFile> {
        self.task(EXPORT_TASK)
            .and_then(|task| task.result.as_ref())
            .map(|result| result.files.iter().collect())
            .unwrap_or_default()
    }

    /// Message of the first task that ended in error.
    pub fn failure_message(&self) -> String {
        self.tasks
            .iter()
            .find(|task| task.status == "error")
            .map(|task| {
                let message = task.message.as_deref().unwrap_or("no details");
                format!("{}: {}", task.name, message)
            })
            .unwrap_or_else(|| format!("job {} ended with status {}", self.id, self.status))
    }
}

impl UploadForm {
    /// Form fields in server order, stringified.
    pub fn fields(&self) -> Vec<(String, String)> {
        self.parameters
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                (key.clone(), text)
            })
            .collect()
    }
}

/// Builds the three-task job: upload import, convert/optimize, URL export.
pub(crate) fn job_payload(
    task: Task,
    extension: &str,
    compression: CompressionLevel,
    output_format: &str,
) -> Value {
    let process = match task {
        Task::Convert => json!({
            "operation": "convert",
            "input": IMPORT_TASK,
            "input_format": extension,
            "output_format": output_format,
        }),
        Task::Compress => json!({
            "operation": "optimize",
            "input": IMPORT_TASK,
            "input_format": "pdf",
            "profile": compression.as_str(),
        }),
    };

    json!({
        "tasks": {
            IMPORT_TASK: { "operation": "import/upload" },
            PROCESS_TASK: process,
            EXPORT_TASK: { "operation": "export/url", "input": PROCESS_TASK },
        },
        "tag": "docbatch",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_payload_names_source_format() {
        let payload = job_payload(Task::Convert, "pptx", CompressionLevel::Max, "pdf");
        let process = &payload["tasks"][PROCESS_TASK];
        assert_eq!(process["operation"], "convert");
        assert_eq!(process["input_format"], "pptx");
        assert_eq!(process["output_format"], "pdf");
        assert!(process.get("profile").is_none());
        assert_eq!(payload["tasks"][EXPORT_TASK]["input"], PROCESS_TASK);
    }

    #[test]
    fn compress_payload_carries_profile() {
        let payload = job_payload(Task::Compress, "pdf", CompressionLevel::Print, "pdf");
        let process = &payload["tasks"][PROCESS_TASK];
        assert_eq!(process["operation"], "optimize");
        assert_eq!(process["profile"], "print");
        assert_eq!(payload["tasks"][IMPORT_TASK]["operation"], "import/upload");
    }

    #[test]
    fn form_fields_stringify_non_string_values() {
        let form: UploadForm = serde_json::from_value(json!({
            "url": "https://upload.example/x",
            "parameters": { "expires": 1700000000, "signature": "abc" }
        }))
        .unwrap();
        let fields = form.fields();
        assert!(fields.contains(&("expires".to_string(), "1700000000".to_string())));
        assert!(fields.contains(&("signature".to_string(), "abc".to_string())));
    }

    #[test]
    fn failure_message_names_failed_task() {
        let job: Job = serde_json::from_value(json!({
            "id": "job-9",
            "status": "error",
            "tasks": [
                { "name": "import-file", "status": "finished" },
                { "name": "process-file", "status": "error", "message": "Invalid PDF" }
            ]
        }))
        .unwrap();
        assert_eq!(job.failure_message(), "process-file: Invalid PDF");
    }
}
