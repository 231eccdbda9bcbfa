//! Gemini REST client (`models/{model}:generateContent`)

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clients::traits::{ContentPart, GenerativeModel, ModelError};
use crate::config::Config;

const BACKOFF_BASE_MS: u64 = 200;

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Text { text: &'a str },
    Inline { inline_data: InlineData<'a> },
}

#[derive(Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

impl<'a> From<&'a ContentPart> for RequestPart<'a> {
    fn from(part: &'a ContentPart) -> Self {
        match part {
            ContentPart::Text(text) => RequestPart::Text {
                text: text.as_str(),
            },
            ContentPart::InlineImage {
                mime_type,
                data_base64,
            } => RequestPart::Inline {
                inline_data: InlineData {
                    mime_type: mime_type.as_str(),
                    data: data_base64.as_str(),
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

/// Concatenate the text parts of the first candidate
pub fn extract_text(response: GenerateContentResponse) -> Result<String, ModelError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(ModelError::EmptyResponse);
    }
    Ok(text)
}

fn is_retryable(status: reqwest::StatusCode) -> bool {
    status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS
}

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    timeout_ms: u64,
    retries: u32,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        api_base: impl Into<String>,
        model: impl Into<String>,
        timeout_ms: u64,
        retries: u32,
    ) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| ModelError::Http(format!("Failed to build reqwest client: {}", e)))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout_ms,
            retries: retries.max(1),
        })
    }

    /// Build from config; fails with `MissingApiKey` when no key is set
    pub fn from_config(config: &Config) -> Result<Self, ModelError> {
        let api_key = config
            .runtime
            .gemini_api_key
            .clone()
            .ok_or(ModelError::MissingApiKey)?;
        Self::new(
            api_key,
            config.model.api_base.clone(),
            config.model.name.clone(),
            config.model.timeout_ms,
            config.model.retries,
        )
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    async fn send_once(&self, body: &GenerateContentRequest<'_>) -> Result<String, ModelError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    ModelError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Parse(e.to_string()))?;
        extract_text(parsed)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, parts: &[ContentPart]) -> Result<String, ModelError> {
        debug!(
            "Gemini generateContent (model={}, parts={})",
            self.model,
            parts.len()
        );
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: parts.iter().map(RequestPart::from).collect(),
            }],
        };

        // Retry transient failures with exponential backoff
        let mut last_err = None;
        for i in 0..self.retries {
            match self.send_once(&body).await {
                Ok(text) => return Ok(text),
                Err(ModelError::Api { status, body })
                    if !reqwest::StatusCode::from_u16(status)
                        .map(is_retryable)
                        .unwrap_or(false) =>
                {
                    return Err(ModelError::Api { status, body });
                }
                Err(e @ (ModelError::Parse(_) | ModelError::EmptyResponse)) => return Err(e),
                Err(e) => {
                    warn!("Gemini attempt {}/{} failed: {}", i + 1, self.retries, e);
                    last_err = Some(e);
                    if i + 1 < self.retries {
                        let delay_ms = BACKOFF_BASE_MS * (1u64 << i);
                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    }
                }
            }
        }

        Err(last_err.unwrap_or(ModelError::EmptyResponse))
    }
}
