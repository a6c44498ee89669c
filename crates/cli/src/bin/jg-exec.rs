// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! jg-exec: run a command as an admitted execution of a job.
//!
//! ```text
//! jg-exec -j <job> [-s <url>] -- <command> [args...]
//! ```

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use jg::executor::os_signals;
use jg::{env, Executor, ExitError, HttpClient, EXIT_ERROR, EXIT_OK};

#[derive(Parser, Debug)]
#[command(
    name = "jg-exec",
    version,
    about = "Start a command (after `--`) as an execution registered with the coordinator"
)]
struct Args {
    /// Name of the job to start
    #[arg(short = 'j', long = "job-name")]
    job_name: String,

    /// Coordinator URL [env: JG_SERVER_URL] [default: http://localhost:8080]
    #[arg(short = 's', long)]
    server_url: Option<String>,

    /// Command and arguments
    #[arg(last = true, required = true)]
    command: Vec<String>,
}

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version print to stdout and succeed
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            std::process::exit(EXIT_OK);
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(EXIT_ERROR);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("jg-exec: {}", e);
            e.code
        }
    };
    std::process::exit(code);
}

async fn run(args: Args) -> Result<i32, ExitError> {
    let signals = os_signals()?;
    let executor = Executor::new(HttpClient::new(env::server_url(args.server_url)));
    let code = executor
        .start_and_watch(CancellationToken::new(), &args.job_name, &args.command, signals)
        .await?;
    if code != EXIT_OK {
        return Err(ExitError::new(code, "process exited with failure"));
    }
    Ok(code)
}
