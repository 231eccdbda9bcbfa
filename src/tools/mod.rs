//! Tool handlers for the ui-prompt-mcp server

pub mod detailed_help;
pub mod enhanced_prompt;
pub mod generate_prompt;
pub mod suggest_components;

use crate::error::{Result, UiPromptError};
use rmcp::model::CallToolRequestParam;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Maximum accepted length of free-text arguments (1 MiB)
pub const MAX_TEXT_BYTES: usize = 1024 * 1024;

/// Deserialize tool arguments; missing arguments become `T::default()`
pub(crate) fn parse_optional_args<T>(request: CallToolRequestParam) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match request.arguments {
        None => Ok(T::default()),
        Some(args) => parse_map(args),
    }
}

/// Deserialize tool arguments that must be present
pub(crate) fn parse_required_args<T>(request: CallToolRequestParam) -> Result<T>
where
    T: DeserializeOwned,
{
    let args = request.arguments.ok_or_else(|| UiPromptError::Mcp {
        message: "Missing parameters".into(),
    })?;
    parse_map(args)
}

fn parse_map<T: DeserializeOwned>(args: serde_json::Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(args)).map_err(|e| UiPromptError::InvalidParams {
        message: format!("Invalid parameters: {}", e),
    })
}

/// Drop blank values; non-blank text is kept verbatim
pub(crate) fn normalize_optional_string(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub(crate) fn ensure_text_size(field: &str, text: &str) -> Result<()> {
    if text.len() > MAX_TEXT_BYTES {
        return Err(UiPromptError::Validation {
            message: format!(
                "'{}' is {} bytes; the limit is {} bytes",
                field,
                text.len(),
                MAX_TEXT_BYTES
            ),
        });
    }
    Ok(())
}
