use anyhow::Result;
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use tracing::info;
use ui_prompt_mcp::{
    config::{Config, Transport},
    http::start_http_server,
    server::{UiPromptServer, router::TOOL_NAMES},
};

/// MCP server generating Vue + Element Plus prompts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Serve MCP over stdin/stdout instead of HTTP
    #[arg(long)]
    stdio: bool,

    /// Override the HTTP listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;
    if cli.stdio {
        config.runtime.transport = Transport::Stdio;
    }
    if let Some(port) = cli.port {
        config.runtime.http_bind.set_port(port);
    }

    ui_prompt_mcp::init_tracing(&config.runtime.log_level);

    info!(
        "Starting {} v{} (model={}, transport={})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.model.name,
        config.runtime.transport.as_str()
    );

    let server = UiPromptServer::new(&config).map_err(|e| {
        eprintln!("Failed to create server: {}", e);
        e
    })?;
    info!("Available tools: {}", TOOL_NAMES.join(", "));

    match config.runtime.transport {
        Transport::Stdio => {
            let service = server.serve(stdio()).await.map_err(|e| {
                eprintln!("Failed to start MCP service: {}", e);
                e
            })?;
            info!("MCP server ready on stdio");
            service.waiting().await?;
        }
        Transport::Http => start_http_server(server).await?,
    }

    Ok(())
}
