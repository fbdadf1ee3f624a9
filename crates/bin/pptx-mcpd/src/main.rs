//! Daemon entry point for the pptx MCP server.
//!
//! Loads configuration from the environment, builds the tool dispatcher, and
//! serves the MCP protocol over streamable HTTP and/or stdio. Logs go to
//! stderr so the stdio transport keeps stdout for the protocol.

mod config;

use std::sync::Arc;

use pptx_mcp::Dispatcher;
use pptx_mcp::server::{self, McpHttpServerConfig};
use tracing::info;

use crate::config::PptxConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = PptxConfig::from_args()?;
    let dispatcher = Arc::new(Dispatcher::new());

    let http = config.mcp_serve.then(|| {
        let http_config = McpHttpServerConfig::new(config.mcp_http_addr)
            .with_stateful_mode(config.stateful_sessions)
            .with_sse_keep_alive(config.sse_keep_alive)
            .with_sse_retry(config.sse_retry);
        tokio::spawn(server::serve_streamable_http(
            dispatcher.clone(),
            http_config,
        ))
    });

    if config.enable_stdio {
        info!("serving MCP over stdio");
        server::serve_stdio(dispatcher).await?;
    }

    if let Some(handle) = http {
        handle.await??;
    }
    Ok(())
}
