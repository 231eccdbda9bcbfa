//! detailed_help tool handler to provide structured help for tools

use crate::error::{Result, UiPromptError};
use crate::prompts::FILTER_COMPONENTS_PROMPT;
use crate::server::UiPromptServer;
use crate::tools::parse_required_args;
use rmcp::model::{CallToolRequestParam, CallToolResult};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub struct DetailedHelpParams {
    pub tool: String,
    #[serde(default)]
    pub format: Option<String>,
}

/// Help document for a tool, `None` for names the server does not expose
pub fn tool_help(tool: &str) -> Option<Value> {
    let help = match tool {
        "generate_pc_prompt" => json!({
            "name": "generate_pc_prompt",
            "description": "Return a ready-to-use prompt for a desktop Vue 3 + Element Plus single-file component.",
            "arguments": {
                "request": "string (optional) — UI requirement; defaults to an admin user-list page"
            },
            "returns": "text — prompt ending with the completeness instruction",
            "examples": [{
                "request": {"name": "generate_pc_prompt", "arguments": {"request": "用户管理页面，带搜索框和表格"}}
            }]
        }),
        "generate_app_prompt" => json!({
            "name": "generate_app_prompt",
            "description": "Return a ready-to-use prompt for a mobile Vue 3 single-file component.",
            "arguments": {
                "request": "string (optional) — UI requirement; defaults to a mobile profile page"
            },
            "returns": "text — prompt ending with the completeness instruction"
        }),
        "generate_gemini_enhanced_prompt" => json!({
            "name": "generate_gemini_enhanced_prompt",
            "description": "Build the base prompt and ask Gemini to expand it with technical detail. Without an API key, or when the call fails, the base prompt is returned.",
            "arguments": {
                "request": "string (optional) — UI requirement",
                "platform": "string — 'PC'|'APP' (default: 'PC')"
            },
            "returns": "text — enhanced prompt ending with the completeness instruction"
        }),
        "suggest_components" => json!({
            "name": "suggest_components",
            "description": "Scan text for UI keywords and map them to Element Plus components and chart widgets. A container is always included; row/col are added as a pair when neither was mentioned.",
            "arguments": {
                "text": "string (required) — UI description or image analysis"
            },
            "returns": {"components": "array of {name, necessity, justification}", "charts": "array of {name, necessity, justification}"},
            "response_format": FILTER_COMPONENTS_PROMPT,
            "examples": [{
                "request": {"name": "suggest_components", "arguments": {"text": "页面顶部有搜索框和按钮"}},
                "response": {"components": [
                    {"name": "el-button", "necessity": "critical", "justification": "..."},
                    {"name": "el-input", "necessity": "important", "justification": "..."},
                    {"name": "el-container", "necessity": "critical", "justification": "..."},
                    {"name": "el-row", "necessity": "critical", "justification": "..."},
                    {"name": "el-col", "necessity": "critical", "justification": "..."}
                ], "charts": []}
            }]
        }),
        "detailed_help" => json!({
            "name": "detailed_help",
            "description": "Describe a tool exposed by this server: arguments, return shape and examples.",
            "arguments": {
                "tool": "string (required) — one of the exposed tool names",
                "format": "string — 'full'|'compact' (default: 'full')"
            },
            "returns": "object — the tool's help document, or {tool, summary, arguments} when compact",
            "examples": [{
                "request": {"name": "detailed_help", "arguments": {"tool": "suggest_components", "format": "compact"}}
            }]
        }),
        _ => return None,
    };
    Some(help)
}

impl UiPromptServer {
    /// Handle the detailed_help tool call
    pub async fn handle_detailed_help(
        &self,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult> {
        let params: DetailedHelpParams = parse_required_args(request)?;
        let tool = params.tool.trim();
        let help = tool_help(tool).ok_or_else(|| UiPromptError::Validation {
            message: format!("Unknown tool: {}", tool),
        })?;

        let output = match params.format.as_deref().unwrap_or("full") {
            "compact" => json!({
                "tool": tool,
                "summary": help.get("description").cloned().unwrap_or(json!("")),
                "arguments": help.get("arguments").cloned().unwrap_or(json!({}))
            }),
            "full" => help,
            other => {
                return Err(UiPromptError::Validation {
                    message: format!("Unknown format: {} (expected 'compact' or 'full')", other),
                });
            }
        };

        Ok(CallToolResult::structured(output))
    }
}
