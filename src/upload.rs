//! Screenshot-to-prompt pipeline behind `POST /upload-image`
//!
//! Progress is reported as a sequence of [`ProgressEvent`]s pushed through a
//! [`ProgressSink`]; the HTTP layer turns them into SSE frames. Every event is
//! mirrored to `tracing` so the server log carries the same trail.

use crate::clients::{ContentPart, ModelError};
use crate::error::{Result, UiPromptError};
use crate::prompts::{self, Platform};
use crate::server::UiPromptServer;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

pub const MISSING_IMAGE: &str = "没有提供图像文件";
pub const PIPELINE_FAILED: &str = "图像上传处理失败";
pub const ANALYSIS_FALLBACK: &str = "图像分析失败";

/// One SSE frame of the upload stream
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Log { message: String, data: Value },
    Error { message: String, error: String },
    Complete(Value),
}

impl ProgressEvent {
    /// SSE `event:` name
    pub fn name(&self) -> &'static str {
        match self {
            ProgressEvent::Log { .. } => "log",
            ProgressEvent::Error { .. } => "error",
            ProgressEvent::Complete(_) => "complete",
        }
    }

    /// SSE `data:` payload
    pub fn payload(&self) -> Value {
        match self {
            ProgressEvent::Log { message, data } => json!({"message": message, "data": data}),
            ProgressEvent::Error { message, error } => json!({"message": message, "error": error}),
            ProgressEvent::Complete(v) => v.clone(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ProgressEvent::Log { .. })
    }
}

/// Sending half of an upload progress stream
#[derive(Clone)]
pub struct ProgressSink {
    tx: mpsc::Sender<ProgressEvent>,
}

impl ProgressSink {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ProgressEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    pub async fn log(&self, message: impl Into<String>, data: Value) {
        let message = message.into();
        tracing::info!("{}", message);
        self.send(ProgressEvent::Log { message, data }).await;
    }

    pub async fn error(&self, message: impl Into<String>, error: impl Into<String>) {
        let message = message.into();
        let error = error.into();
        tracing::error!("{}: {}", error, message);
        self.send(ProgressEvent::Error { message, error }).await;
    }

    pub async fn complete(&self, payload: Value) {
        self.send(ProgressEvent::Complete(payload)).await;
    }

    async fn send(&self, event: ProgressEvent) {
        // A closed receiver means the client went away; the pipeline still finishes.
        if self.tx.send(event).await.is_err() {
            tracing::debug!("upload progress receiver dropped");
        }
    }
}

/// Image part of a multipart upload
#[derive(Debug, Clone, Default)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    /// Declared content type, else one guessed from the file extension
    pub fn mime_type(&self) -> String {
        if let Some(ct) = self.content_type.as_deref().filter(|c| !c.trim().is_empty()) {
            return ct.to_string();
        }
        let ext = self
            .file_name
            .as_deref()
            .and_then(|n| Path::new(n).extension())
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("bmp") => "image/bmp",
            _ => "application/octet-stream",
        }
        .to_string()
    }

    /// `.ext` of the original file name, empty when there is none
    pub fn extension(&self) -> String {
        self.file_name
            .as_deref()
            .and_then(|n| Path::new(n).extension())
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default()
    }
}

/// Parsed `/upload-image` form
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub image: Option<UploadedImage>,
    pub platform: Platform,
    pub request: Option<String>,
}

#[derive(Debug)]
struct SavedFile {
    path: PathBuf,
    file_name: String,
}

/// Run the whole pipeline, reporting through `sink`. A missing image yields
/// `error` then `complete {error}`; otherwise the stream ends with exactly one
/// terminal event (`complete` or `error`).
pub async fn process_upload(server: &UiPromptServer, upload: UploadRequest, sink: &ProgressSink) {
    sink.log("====== 开始处理图像上传请求 ======", Value::Null).await;

    let image = match upload.image {
        Some(img) if !img.bytes.is_empty() => img,
        _ => {
            sink.error(format!("错误: {}", MISSING_IMAGE), MISSING_IMAGE)
                .await;
            sink.complete(json!({"error": MISSING_IMAGE})).await;
            return;
        }
    };

    let platform = upload.platform;
    let request = upload.request.filter(|r| !r.trim().is_empty());

    match run_pipeline(server, &image, platform, request.as_deref(), sink).await {
        Ok(payload) => {
            sink.log("处理完成，发送最终结果", Value::Null).await;
            sink.complete(payload).await;
        }
        Err(e) => sink.error(e.to_string(), PIPELINE_FAILED).await,
    }
}

async fn run_pipeline(
    server: &UiPromptServer,
    image: &UploadedImage,
    platform: Platform,
    request: Option<&str>,
    sink: &ProgressSink,
) -> Result<Value> {
    let saved = save_image(&server.config.runtime.uploads_dir, image).await?;
    sink.log(
        "文件已成功上传",
        json!({
            "path": saved.path.display().to_string(),
            "fileName": saved.file_name,
            "originalName": image.file_name,
            "mimeType": image.mime_type(),
            "size": image.bytes.len()
        }),
    )
    .await;

    sink.log(
        "请求参数",
        json!({"platform": platform.as_str(), "request": request.unwrap_or("(使用默认值)")}),
    )
    .await;
    sink.log(format!("选择{}平台的指导原则", platform.label()), Value::Null)
        .await;

    let model = server.model.as_ref().ok_or(ModelError::MissingApiKey)?;
    sink.log(
        "调用Gemini API分析图像...",
        json!({"model": model.model_name()}),
    )
    .await;
    let parts = [
        ContentPart::text(prompts::IMAGE_ANALYSIS_PROMPT),
        ContentPart::image(image.mime_type(), &image.bytes),
    ];
    let analysis = match model.generate(&parts).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) | Err(ModelError::EmptyResponse) => ANALYSIS_FALLBACK.to_string(),
        Err(e) => return Err(e.into()),
    };
    sink.log(
        "图像分析完成",
        json!({"length": analysis.chars().count()}),
    )
    .await;

    sink.log("开始筛选Element Plus组件...", Value::Null).await;
    let suggestions = server.catalog.suggest(&analysis).to_pretty_json()?;
    sink.log(
        "Element Plus组件筛选完成",
        json!({"length": suggestions.chars().count()}),
    )
    .await;

    let prompt_text = prompts::component_prompt(platform, &analysis, &suggestions, request);
    sink.log(
        "提示词构建完成",
        json!({"length": prompt_text.chars().count()}),
    )
    .await;

    Ok(json!({
        "success": true,
        "filePath": saved.path.display().to_string(),
        "fileName": saved.file_name,
        "imageAnalysis": analysis,
        "promptText": prompt_text
    }))
}

/// `{unix_millis}-{uuid}{ext}`
pub fn stored_file_name(extension: &str) -> String {
    format!(
        "{}-{}{}",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple(),
        extension
    )
}

async fn save_image(dir: &Path, image: &UploadedImage) -> Result<SavedFile> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| UiPromptError::Upload {
            message: format!("cannot create uploads dir {}: {}", dir.display(), e),
        })?;
    let file_name = stored_file_name(&image.extension());
    let path = dir.join(&file_name);
    tokio::fs::write(&path, &image.bytes).await?;
    Ok(SavedFile { path, file_name })
}
