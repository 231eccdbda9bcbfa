//! Domain-specific error types for ui-prompt-mcp

use serde_json::json;
use thiserror::Error;

/// Main error type for the ui-prompt-mcp server
#[derive(Error, Debug)]
pub enum UiPromptError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Model error: {message}")]
    Model { message: String },

    #[error("MCP protocol error: {message}")]
    Mcp { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid parameters: {message}")]
    InvalidParams { message: String },

    #[error("Upload error: {message}")]
    Upload { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<anyhow::Error> for UiPromptError {
    fn from(err: anyhow::Error) -> Self {
        UiPromptError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for UiPromptError {
    fn from(err: serde_json::Error) -> Self {
        UiPromptError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for UiPromptError {
    fn from(err: toml::de::Error) -> Self {
        UiPromptError::Config {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for UiPromptError {
    fn from(err: std::io::Error) -> Self {
        UiPromptError::Io {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for UiPromptError {
    fn from(err: reqwest::Error) -> Self {
        UiPromptError::Model {
            message: format!("HTTP request failed: {}", err),
        }
    }
}

impl From<crate::clients::ModelError> for UiPromptError {
    fn from(err: crate::clients::ModelError) -> Self {
        UiPromptError::Model {
            message: err.to_string(),
        }
    }
}

impl From<rmcp::ErrorData> for UiPromptError {
    fn from(err: rmcp::ErrorData) -> Self {
        UiPromptError::Mcp {
            message: err.message.to_string(),
        }
    }
}

/// Convert UiPromptError to MCP error
impl From<UiPromptError> for rmcp::ErrorData {
    fn from(err: UiPromptError) -> Self {
        let (code, label, details) = match err {
            UiPromptError::Config { message } => (
                rmcp::model::ErrorCode::INVALID_PARAMS,
                "Configuration error",
                message,
            ),
            UiPromptError::Model { message } => (
                rmcp::model::ErrorCode::INTERNAL_ERROR,
                "Model error",
                message,
            ),
            UiPromptError::Mcp { message } => (
                rmcp::model::ErrorCode::INVALID_PARAMS,
                "MCP protocol error",
                message,
            ),
            UiPromptError::Serialization { message } => (
                rmcp::model::ErrorCode::INTERNAL_ERROR,
                "Serialization error",
                message,
            ),
            UiPromptError::Validation { message } => (
                rmcp::model::ErrorCode::INVALID_PARAMS,
                "Validation error",
                message,
            ),
            UiPromptError::InvalidParams { message } => (
                rmcp::model::ErrorCode::INVALID_PARAMS,
                "Invalid parameters",
                message,
            ),
            UiPromptError::Upload { message } => (
                rmcp::model::ErrorCode::INVALID_PARAMS,
                "Upload error",
                message,
            ),
            UiPromptError::Io { message } => (
                rmcp::model::ErrorCode::INTERNAL_ERROR,
                "I/O error",
                message,
            ),
            UiPromptError::Internal { message } => (
                rmcp::model::ErrorCode::INTERNAL_ERROR,
                "Internal error",
                message,
            ),
        };

        rmcp::ErrorData {
            code,
            message: format!("{label}: {details}").into(),
            data: Some(json!({ "details": details })),
        }
    }
}

/// Result type alias for ui-prompt-mcp operations
pub type Result<T> = std::result::Result<T, UiPromptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_invalid_params() {
        let err: rmcp::ErrorData = UiPromptError::Validation {
            message: "bad tool".into(),
        }
        .into();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert_eq!(err.message, "Validation error: bad tool");
        assert_eq!(err.data, Some(json!({"details": "bad tool"})));
    }

    #[test]
    fn model_maps_to_internal_error() {
        let err: rmcp::ErrorData = UiPromptError::Model {
            message: "503".into(),
        }
        .into();
        assert_eq!(err.code, rmcp::model::ErrorCode::INTERNAL_ERROR);
    }

    #[test]
    fn toml_errors_become_config_errors() {
        let parse = toml::from_str::<toml::Value>("= nope").unwrap_err();
        assert!(matches!(
            UiPromptError::from(parse),
            UiPromptError::Config { .. }
        ));
    }
}
