use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One piece of a multimodal generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentPart {
    Text(String),
    InlineImage {
        mime_type: String,
        data_base64: String,
    },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text(text.into())
    }

    /// Inline image part; `bytes` are base64-encoded here
    pub fn image(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        ContentPart::InlineImage {
            mime_type: mime_type.into(),
            data_base64: STANDARD.encode(bytes),
        }
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,
    #[error("http error: {0}")]
    Http(String),
    #[error("api error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("model returned no text")]
    EmptyResponse,
    #[error("model timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Model identifier, for logs and `/info`
    fn model_name(&self) -> &str;

    async fn generate(&self, parts: &[ContentPart]) -> Result<String, ModelError>;
}
