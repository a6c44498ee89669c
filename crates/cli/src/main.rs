// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! jg: manage jobs on a Job Guard coordinator.

use anyhow::Result;
use clap::{Parser, Subcommand};

use jg::commands::job::{self, JobArgs};
use jg::output::OutputFormat;
use jg::{color, env, HttpClient};

#[derive(Parser)]
#[command(name = "jg", version, about = "Job Guard control", styles = color::styles())]
struct Cli {
    /// Coordinator URL [env: JG_SERVER_URL] [default: http://localhost:8080]
    #[arg(short = 's', long, global = true)]
    server_url: Option<String>,

    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value_t)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Job management
    Job(JobArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let client = HttpClient::new(env::server_url(cli.server_url));
    match cli.command {
        Command::Job(args) => job::handle(args.command, &client, cli.format).await,
    }
}
