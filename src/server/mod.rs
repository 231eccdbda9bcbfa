//! Server module containing the UiPromptServer implementation

use crate::clients::{GeminiClient, GenerativeModel, ModelError};
use crate::components::ComponentCatalog;
use crate::config::Config;
use crate::error::Result;
use std::sync::Arc;

// Submodules
pub mod router;

/// Main ui-prompt-mcp server implementation
#[derive(Clone)]
pub struct UiPromptServer {
    pub config: Arc<Config>,
    pub catalog: Arc<ComponentCatalog>,
    /// `None` when no API key is configured; model-backed features degrade
    pub model: Option<Arc<dyn GenerativeModel>>,
}

impl UiPromptServer {
    /// Build the server from configuration: load the dictionary and, when a
    /// key is present, the Gemini client.
    pub fn new(config: &Config) -> Result<Self> {
        let catalog = ComponentCatalog::load(config)?;
        tracing::info!(
            "Component dictionary v{} ({}) loaded: {} keywords",
            catalog.version(),
            catalog.library(),
            catalog.dictionary().len()
        );

        let model: Option<Arc<dyn GenerativeModel>> = match GeminiClient::from_config(config) {
            Ok(client) => Some(Arc::new(client)),
            Err(ModelError::MissingApiKey) => {
                tracing::warn!(
                    "GEMINI_API_KEY not set; enhanced prompts fall back to the base prompt and image upload is unavailable"
                );
                None
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self::with_parts(config.clone(), catalog, model))
    }

    /// Assemble from prebuilt parts (tests, embedding)
    pub fn with_parts(
        config: Config,
        catalog: ComponentCatalog,
        model: Option<Arc<dyn GenerativeModel>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            model,
        }
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model.as_deref().map(|m| m.model_name())
    }
}
