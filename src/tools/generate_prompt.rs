//! generate_pc_prompt / generate_app_prompt tool handlers

use crate::error::Result;
use crate::prompts::{self, Platform};
use crate::server::UiPromptServer;
use crate::tools::{ensure_text_size, normalize_optional_string, parse_optional_args};
use rmcp::model::{CallToolRequestParam, CallToolResult, Content};
use serde::Deserialize;

/// Parameters shared by the two plain prompt tools
#[derive(Debug, Default, Deserialize)]
pub struct GeneratePromptParams {
    #[serde(default)]
    pub request: Option<String>,
}

impl UiPromptServer {
    pub async fn handle_generate_pc_prompt(
        &self,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult> {
        self.generate_prompt(Platform::Pc, request)
    }

    pub async fn handle_generate_app_prompt(
        &self,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult> {
        self.generate_prompt(Platform::App, request)
    }

    fn generate_prompt(
        &self,
        platform: Platform,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult> {
        let params: GeneratePromptParams = parse_optional_args(request)?;
        let user_request = normalize_optional_string(params.request);
        if let Some(r) = user_request.as_deref() {
            ensure_text_size("request", r)?;
        }

        let text = prompts::standard_prompt(platform, user_request.as_deref());
        tracing::debug!(
            "generated {} prompt ({} chars, default_request={})",
            platform.as_str(),
            text.chars().count(),
            user_request.is_none()
        );
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
