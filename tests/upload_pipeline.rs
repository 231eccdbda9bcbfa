//! The screenshot pipeline driven directly through `process_upload`.

mod common;

use common::{Reply, StubModel, server_with};
use std::sync::Arc;
use tokio::sync::mpsc;
use ui_prompt_mcp::clients::{ContentPart, GenerativeModel};
use ui_prompt_mcp::prompts::{IMAGE_ANALYSIS_PROMPT, Platform};
use ui_prompt_mcp::upload::{
    ANALYSIS_FALLBACK, MISSING_IMAGE, PIPELINE_FAILED, ProgressEvent, ProgressSink,
    UploadRequest, UploadedImage, process_upload,
};

fn png() -> UploadedImage {
    UploadedImage {
        file_name: Some("mock.png".into()),
        content_type: Some("image/png".into()),
        bytes: vec![0x89, b'P', b'N', b'G', 0, 1],
    }
}

async fn drain(mut rx: mpsc::Receiver<ProgressEvent>) -> Vec<ProgressEvent> {
    let mut events = Vec::new();
    while let Some(e) = rx.recv().await {
        events.push(e);
    }
    events
}

async fn run(
    model: Option<Arc<dyn GenerativeModel>>,
    upload: UploadRequest,
) -> (Vec<ProgressEvent>, std::path::PathBuf) {
    let server = server_with(model);
    let dir = server.config.runtime.uploads_dir.clone();
    let (sink, rx) = ProgressSink::channel(64);
    process_upload(&server, upload, &sink).await;
    drop(sink);
    (drain(rx).await, dir)
}

#[tokio::test]
async fn successful_upload_saves_file_and_builds_prompt() {
    let model = StubModel::new(Reply::Text("顶部有按钮，下方是折线图".into()));
    let upload = UploadRequest {
        image: Some(png()),
        platform: Platform::Pc,
        request: None,
    };
    let (events, dir) = run(Some(model.clone() as Arc<dyn GenerativeModel>), upload).await;

    let terminal: Vec<_> = events.iter().filter(|e| e.is_terminal()).collect();
    assert_eq!(terminal.len(), 1);
    let ProgressEvent::Complete(done) = terminal[0] else {
        panic!("expected complete, got {:?}", terminal[0]);
    };
    assert_eq!(done["success"], true);

    let saved = std::path::Path::new(done["filePath"].as_str().unwrap());
    assert!(saved.starts_with(&dir));
    assert_eq!(std::fs::read(saved).unwrap(), png().bytes);

    let prompt = done["promptText"].as_str().unwrap();
    assert!(prompt.contains("顶部有按钮，下方是折线图"));
    assert!(prompt.contains("\"el-button\""));
    assert!(prompt.contains("\"echarts\""));
    assert!(prompt.contains("### PC端开发指导原则"));
    assert!(!prompt.contains("### 具体需求"));

    let calls = model.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0][0], ContentPart::text(IMAGE_ANALYSIS_PROMPT));
    assert!(matches!(
        &calls[0][1],
        ContentPart::InlineImage { mime_type, .. } if mime_type == "image/png"
    ));
    drop(calls);

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn missing_image_reports_error_then_completes() {
    let (events, _) = run(None, UploadRequest::default()).await;
    let names: Vec<_> = events.iter().map(ProgressEvent::name).collect();
    assert_eq!(names, vec!["log", "error", "complete"]);
    match &events[1] {
        ProgressEvent::Error { message, error } => {
            assert_eq!(message, &format!("错误: {}", MISSING_IMAGE));
            assert_eq!(error, MISSING_IMAGE);
        }
        other => panic!("expected error event, got {:?}", other),
    }
    match events.last() {
        Some(ProgressEvent::Complete(v)) => assert_eq!(v["error"], MISSING_IMAGE),
        other => panic!("unexpected last event {:?}", other),
    }
}

#[tokio::test]
async fn empty_file_counts_as_missing() {
    let upload = UploadRequest {
        image: Some(UploadedImage {
            bytes: Vec::new(),
            ..png()
        }),
        ..Default::default()
    };
    let (events, _) = run(None, upload).await;
    assert!(matches!(
        events.last(),
        Some(ProgressEvent::Complete(v)) if v["error"] == MISSING_IMAGE
    ));
}

#[tokio::test]
async fn model_failure_emits_single_error_event() {
    let model = StubModel::new(Reply::Fail);
    let upload = UploadRequest {
        image: Some(png()),
        ..Default::default()
    };
    let (events, dir) = run(Some(model as Arc<dyn GenerativeModel>), upload).await;
    let terminal: Vec<_> = events.iter().filter(|e| e.is_terminal()).collect();
    assert_eq!(terminal.len(), 1);
    match terminal[0] {
        ProgressEvent::Error { message, error } => {
            assert_eq!(error, PIPELINE_FAILED);
            assert!(message.contains("backend unavailable"));
        }
        other => panic!("expected error event, got {:?}", other),
    }
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn no_model_configured_is_a_pipeline_error() {
    let upload = UploadRequest {
        image: Some(png()),
        ..Default::default()
    };
    let (events, dir) = run(None, upload).await;
    assert!(matches!(
        events.last(),
        Some(ProgressEvent::Error { error, .. }) if error == PIPELINE_FAILED
    ));
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn blank_analysis_uses_placeholder() {
    let model = StubModel::new(Reply::Blank);
    let upload = UploadRequest {
        image: Some(png()),
        platform: Platform::App,
        request: Some("  加一个底部导航  ".into()),
    };
    let (events, dir) = run(Some(model as Arc<dyn GenerativeModel>), upload).await;
    let Some(ProgressEvent::Complete(done)) = events.last() else {
        panic!("expected complete, got {:?}", events.last());
    };
    assert_eq!(done["imageAnalysis"], ANALYSIS_FALLBACK);
    let prompt = done["promptText"].as_str().unwrap();
    assert!(prompt.contains("### 具体需求 (Specific Request):\n  加一个底部导航  \n"));
    assert!(prompt.contains("### 移动端开发指导原则"));
    let _ = std::fs::remove_dir_all(dir);
}
