// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! jgd: the Job Guard coordinator.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use jg_daemon::shutdown::install_shutdown_handler;
use jg_daemon::{env, lifecycle, Config};

#[derive(Parser, Debug)]
#[command(name = "jgd", version, about = "Job Guard coordinator")]
struct Args {
    /// Address to listen on; `:port` binds every interface
    #[arg(long, default_value = ":8080")]
    listen: String,

    /// Database file
    #[arg(long = "db-path", alias = "dbPath", default_value = "./data.db")]
    db_path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing()?;

    let config = Config::new(&args.listen, args.db_path)?;
    let started = lifecycle::startup(&config).await.context("coordinator startup failed")?;
    let shutdown = install_shutdown_handler();
    lifecycle::run(started, shutdown).await?;
    Ok(())
}

/// Log to stderr, or append to `jgd.log` under `JG_LOG_DIR`. Level comes
/// from `RUST_LOG`, default `info`.
fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match env::log_dir() {
        Some(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log dir {}", dir.display()))?;
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join("jgd.log"))
                .context("failed to open log file")?;
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(file).with_ansi(false))
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}
