// ABOUTME: Binary entry point for the AROMI coach server
// ABOUTME: Loads env configuration, initializes logging, serves until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use aromi_coach_server::config::ServerConfig;
use aromi_coach_server::logging;
use aromi_coach_server::server::{CoachServer, ServerResources};

/// AROMI coach - streaming AI health coaching service
#[derive(Debug, Parser)]
#[command(name = "aromi-coach-server", version)]
struct Args {
    /// Override the HTTP port from AROMI_HTTP_PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let args = Args::parse();
    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }

    let resources = Arc::new(ServerResources::new(config));
    CoachServer::new(resources).run().await?;
    Ok(())
}
