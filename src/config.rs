use serde::{Deserialize, Serialize};

const DEFAULT_HTTP_BIND: ([u8; 4], u16) = ([127, 0, 0, 1], 3002);

/// Main configuration structure loaded from ui_prompt.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub components: ComponentsConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Generative model settings (Gemini REST API)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    pub api_base: String,
    pub timeout_ms: u64,
    pub retries: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "gemini-2.0-flash".to_string(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_ms: 60_000,
            retries: 3,
        }
    }
}

/// Component dictionary source
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ComponentsConfig {
    /// TOML dictionary to load instead of the compiled-in Element Plus one
    pub dictionary_path: Option<String>,
}

/// How the MCP server is exposed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    Http,
}

impl Transport {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdio" | "cli" => Some(Transport::Stdio),
            "http" | "sse" => Some(Transport::Http),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Stdio => "stdio",
            Transport::Http => "http",
        }
    }
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub gemini_api_key: Option<String>,
    pub log_level: String,
    pub transport: Transport,
    pub http_bind: std::net::SocketAddr,
    pub http_path: String,
    pub bearer_token: Option<String>,
    pub allow_token_in_url: bool,
    pub http_sse_keepalive_sec: u64,
    pub uploads_dir: std::path::PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            log_level: crate::DEFAULT_LOG_FILTER.to_string(),
            transport: Transport::Http,
            http_bind: std::net::SocketAddr::from(DEFAULT_HTTP_BIND),
            http_path: "/mcp".to_string(),
            bearer_token: None,
            allow_token_in_url: false,
            http_sse_keepalive_sec: 15,
            uploads_dir: std::path::PathBuf::from("uploads"),
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses UI_PROMPT_CONFIG environment variable or defaults to "ui_prompt.toml"
    pub fn load() -> anyhow::Result<Self> {
        // UIP_ENV_FILE if set, otherwise ./.env
        if let Ok(env_path) = std::env::var("UIP_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::from_path(".env");
        }

        let config_path =
            std::env::var("UI_PROMPT_CONFIG").unwrap_or_else(|_| "ui_prompt.toml".to_string());

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            toml::from_str(&content)?
        } else {
            tracing::debug!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        // Env-first overrides for the model
        if let Ok(model) = std::env::var("GEMINI_MODEL")
            && !model.trim().is_empty()
        {
            config.model.name = model.trim().to_string();
            tracing::debug!("GEMINI_MODEL env override applied");
        }
        if let Some(timeout) = std::env::var("GEMINI_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.model.timeout_ms = timeout;
        }
        if let Ok(path) = std::env::var("UIP_COMPONENTS_FILE") {
            config.components.dictionary_path = Some(path);
        }

        config.runtime = RuntimeConfig::load_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Clamp soft limits and reject settings the server cannot run with
    pub fn validate(&mut self) -> anyhow::Result<()> {
        if self.model.retries == 0 {
            self.model.retries = 1;
        } else if self.model.retries > 10 {
            tracing::warn!(
                "model.retries {} exceeds max 10, clamping to 10",
                self.model.retries
            );
            self.model.retries = 10;
        }
        if self.model.timeout_ms == 0 {
            anyhow::bail!("model.timeout_ms must be > 0");
        }
        if self.model.name.trim().is_empty() {
            anyhow::bail!("model.name must not be empty");
        }
        if !self.model.api_base.starts_with("http://") && !self.model.api_base.starts_with("https://")
        {
            anyhow::bail!(
                "model.api_base '{}' must start with http:// or https://",
                self.model.api_base
            );
        }
        if !self.runtime.http_path.starts_with('/') {
            anyhow::bail!("UIP_HTTP_PATH must start with '/'");
        }
        Ok(())
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        let mut cfg = Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| crate::DEFAULT_LOG_FILTER.to_string()),
            ..Self::default()
        };

        if let Ok(t) = std::env::var("UIP_TRANSPORT") {
            match Transport::parse(&t) {
                Some(transport) => cfg.transport = transport,
                None => tracing::warn!("Unknown UIP_TRANSPORT '{}', using http", t),
            }
        }
        if let Ok(v) = std::env::var("UIP_HTTP_BIND")
            && let Ok(bind) = v.parse::<std::net::SocketAddr>()
        {
            cfg.http_bind = bind;
        }
        if let Some(port) = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
        {
            cfg.http_bind.set_port(port);
        }
        cfg.http_path = std::env::var("UIP_HTTP_PATH").unwrap_or_else(|_| "/mcp".to_string());
        cfg.bearer_token = std::env::var("UIP_BEARER_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        if let Ok(allow) = std::env::var("UIP_ALLOW_TOKEN_IN_URL") {
            cfg.allow_token_in_url = allow == "1" || allow.eq_ignore_ascii_case("true");
        }
        if let Some(sse) = std::env::var("UIP_HTTP_SSE_KEEPALIVE_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            cfg.http_sse_keepalive_sec = sse;
        }
        if let Ok(dir) = std::env::var("UIP_UPLOADS_DIR") {
            cfg.uploads_dir = dir.into();
        }

        cfg
    }
}
