//! generate_gemini_enhanced_prompt tool handler
//!
//! Builds the base prompt, asks the model to rewrite it, and appends the
//! closing instruction. Model failures never fail the tool call: the base
//! prompt is returned instead.

use crate::clients::ContentPart;
use crate::error::Result;
use crate::prompts::{self, Platform};
use crate::server::UiPromptServer;
use crate::tools::{ensure_text_size, normalize_optional_string, parse_optional_args};
use rmcp::model::{CallToolRequestParam, CallToolResult, Content};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct EnhancedPromptParams {
    #[serde(default)]
    pub request: Option<String>,
    #[serde(default)]
    pub platform: Option<Platform>,
}

impl UiPromptServer {
    pub async fn handle_enhanced_prompt(
        &self,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult> {
        let params: EnhancedPromptParams = parse_optional_args(request)?;
        let platform = params.platform.unwrap_or_default();
        let user_request = normalize_optional_string(params.request);
        if let Some(r) = user_request.as_deref() {
            ensure_text_size("request", r)?;
        }

        let text = self
            .enhance_prompt(platform, user_request.as_deref())
            .await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Enhanced prompt text, or the base prompt when the model is unavailable
    pub async fn enhance_prompt(&self, platform: Platform, request: Option<&str>) -> String {
        let base = prompts::base_prompt(platform, request);

        let Some(model) = self.model.as_ref() else {
            tracing::warn!("enhanced prompt requested without a model; returning base prompt");
            return prompts::finish_enhanced(&base);
        };

        let meta = prompts::enhancement_request(platform, &base);
        match model.generate(&[ContentPart::text(meta)]).await {
            Ok(enhanced) if !enhanced.trim().is_empty() => {
                tracing::info!(
                    "prompt enhanced by {} ({} -> {} chars)",
                    model.model_name(),
                    base.chars().count(),
                    enhanced.chars().count()
                );
                prompts::finish_enhanced(&enhanced)
            }
            Ok(_) => {
                tracing::warn!("model returned an empty enhancement; returning base prompt");
                prompts::finish_enhanced(&base)
            }
            Err(e) => {
                tracing::warn!("Gemini enhancement failed: {}; returning base prompt", e);
                prompts::finish_enhanced(&base)
            }
        }
    }
}
