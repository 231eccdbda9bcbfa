//! suggest_components tool handler

use crate::error::Result;
use crate::server::UiPromptServer;
use crate::tools::{ensure_text_size, parse_required_args};
use rmcp::model::{CallToolRequestParam, CallToolResult};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SuggestComponentsParams {
    pub text: String,
}

impl UiPromptServer {
    pub async fn handle_suggest_components(
        &self,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult> {
        let params: SuggestComponentsParams = parse_required_args(request)?;
        ensure_text_size("text", &params.text)?;

        let result = self.catalog.suggest(&params.text);
        tracing::debug!(
            "suggest_components: {} components, {} charts",
            result.components.len(),
            result.charts.len()
        );
        Ok(CallToolResult::structured(serde_json::to_value(&result)?))
    }
}
