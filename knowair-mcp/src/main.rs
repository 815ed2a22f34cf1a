//! Binary crate for the `knowair` weather MCP server.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Serving the weather tools over MCP stdio

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod mcp;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
