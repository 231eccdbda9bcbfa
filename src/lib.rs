pub mod clients;
pub mod components;
pub mod config;
pub mod error;
pub mod http;
pub mod prompts;
pub mod schemas;
pub mod server;
pub mod tools;
pub mod upload;

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "ui_prompt_mcp=info,rmcp=info";

/// Install the stderr tracing subscriber; stdout stays free for stdio MCP.
pub fn init_tracing(filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_new(filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
