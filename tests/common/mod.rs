//! Shared fixtures for integration tests: a scripted model and a server
//! built from the compiled-in dictionary.
#![allow(dead_code)]

use async_trait::async_trait;
use rmcp::model::{CallToolRequestParam, CallToolResult};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use ui_prompt_mcp::clients::{ContentPart, GenerativeModel, ModelError};
use ui_prompt_mcp::components::ComponentCatalog;
use ui_prompt_mcp::config::Config;
use ui_prompt_mcp::server::UiPromptServer;

#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Blank,
    Fail,
}

/// Model double that records every request and answers with a fixed reply
pub struct StubModel {
    reply: Reply,
    pub calls: Mutex<Vec<Vec<ContentPart>>>,
}

impl StubModel {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeModel for StubModel {
    fn model_name(&self) -> &str {
        "stub-model"
    }

    async fn generate(&self, parts: &[ContentPart]) -> Result<String, ModelError> {
        self.calls.lock().unwrap().push(parts.to_vec());
        match &self.reply {
            Reply::Text(t) => Ok(t.clone()),
            Reply::Blank => Ok("   ".to_string()),
            Reply::Fail => Err(ModelError::Api {
                status: 500,
                body: "backend unavailable".into(),
            }),
        }
    }
}

pub fn temp_uploads_dir() -> PathBuf {
    std::env::temp_dir().join(format!("uip-test-{}", uuid::Uuid::new_v4().simple()))
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.runtime.uploads_dir = temp_uploads_dir();
    config
}

pub fn server_with(model: Option<Arc<dyn GenerativeModel>>) -> UiPromptServer {
    server_with_config(test_config(), model)
}

pub fn server_with_config(
    config: Config,
    model: Option<Arc<dyn GenerativeModel>>,
) -> UiPromptServer {
    let catalog = ComponentCatalog::builtin().expect("builtin dictionary loads");
    UiPromptServer::with_parts(config, catalog, model)
}

pub fn call(name: &str, args: Option<Value>) -> CallToolRequestParam {
    CallToolRequestParam {
        name: name.to_string().into(),
        arguments: args.and_then(|v| v.as_object().cloned()),
    }
}

/// First text content block of a tool result
pub fn result_text(result: &CallToolResult) -> String {
    let v = serde_json::to_value(result).unwrap();
    v["content"][0]["text"].as_str().unwrap_or_default().to_string()
}

pub fn structured(result: &CallToolResult) -> Value {
    serde_json::to_value(result).unwrap()["structuredContent"].clone()
}

pub const BOUNDARY: &str = "uip-test-boundary";

/// One multipart/form-data part
pub struct FormPart<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub body: &'a [u8],
}

pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut out = Vec::new();
    for part in parts {
        out.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(f) = part.file_name {
            disposition.push_str(&format!("; filename=\"{}\"", f));
        }
        out.extend_from_slice(disposition.as_bytes());
        out.extend_from_slice(b"\r\n");
        if let Some(ct) = part.content_type {
            out.extend_from_slice(format!("Content-Type: {}\r\n", ct).as_bytes());
        }
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(part.body);
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    out
}

/// Split an SSE body into `(event, data)` pairs, skipping comment frames
pub fn parse_sse(body: &str) -> Vec<(String, Value)> {
    body.split("\n\n")
        .filter_map(|frame| {
            let mut event = None;
            let mut data = String::new();
            for line in frame.lines() {
                if let Some(e) = line.strip_prefix("event:") {
                    event = Some(e.trim().to_string());
                } else if let Some(d) = line.strip_prefix("data:") {
                    data.push_str(d.trim_start());
                }
            }
            let event = event?;
            Some((event, serde_json::from_str(&data).unwrap_or(Value::Null)))
        })
        .collect()
}
