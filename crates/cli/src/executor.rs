// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent side of an execution: ask the coordinator for admission, run the
//! child, forward signals to it, report its exit.

use std::fs::File;
use std::process::{ExitStatus, Stdio};

use chrono::Utc;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use thiserror::Error;
use tokio::process::{Child, Command};
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use jg_core::{ExecutionId, StartArguments};

use crate::client::{ClientError, CoordinatorClient};

pub const EXIT_OK: i32 = 0;
pub const EXIT_ERROR: i32 = 1;

/// Signals relayed from the agent to its child.
pub const FORWARDED_SIGNALS: [Signal; 6] = [
    Signal::SIGINT,
    Signal::SIGTERM,
    Signal::SIGHUP,
    Signal::SIGQUIT,
    Signal::SIGUSR1,
    Signal::SIGUSR2,
];

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("no command given")]
    NoCommand,

    #[error("start refused: {0}")]
    Start(#[source] ClientError),

    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for child: {0}")]
    Wait(#[source] std::io::Error),

    #[error("failed to install signal handler: {0}")]
    Signal(#[source] std::io::Error),
}

/// Where a child's output stream goes.
#[derive(Debug, Default)]
pub enum Sink {
    /// Share the agent's stream
    #[default]
    Inherit,
    Null,
    File(File),
}

impl Sink {
    fn stdio(&self) -> std::io::Result<Stdio> {
        Ok(match self {
            Sink::Inherit => Stdio::inherit(),
            Sink::Null => Stdio::null(),
            Sink::File(file) => Stdio::from(file.try_clone()?),
        })
    }
}

/// Register handlers for [`FORWARDED_SIGNALS`] and stream deliveries.
///
/// Registration replaces the default disposition, so the agent survives
/// these signals and leaves the decision to the child.
pub fn os_signals() -> Result<mpsc::Receiver<Signal>, ExecutorError> {
    let (tx, rx) = mpsc::channel(16);
    for sig in FORWARDED_SIGNALS {
        let mut stream = signal(SignalKind::from_raw(sig as i32)).map_err(ExecutorError::Signal)?;
        let tx = tx.clone();
        tokio::spawn(async move {
            while stream.recv().await.is_some() {
                if tx.send(sig).await.is_err() {
                    break;
                }
            }
        });
    }
    Ok(rx)
}

/// Runs one command as one execution of a job.
pub struct Executor<C: CoordinatorClient> {
    client: C,
    stdout: Sink,
    stderr: Sink,
}

impl<C: CoordinatorClient> Executor<C> {
    pub fn new(client: C) -> Self {
        Self { client, stdout: Sink::Inherit, stderr: Sink::Inherit }
    }

    pub fn stdout(mut self, sink: Sink) -> Self {
        self.stdout = sink;
        self
    }

    pub fn stderr(mut self, sink: Sink) -> Self {
        self.stderr = sink;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Admit, run and report `argv` as an execution of `job`.
    ///
    /// Returns the agent exit code: [`EXIT_OK`] when the child succeeded,
    /// [`EXIT_ERROR`] otherwise. Signals received on `signals` are forwarded
    /// to the child until it exits. Cancelling `cancel` stops forwarding but
    /// neither kills nor abandons the child.
    pub async fn start_and_watch(
        &self,
        cancel: CancellationToken,
        job: &str,
        argv: &[String],
        signals: mpsc::Receiver<Signal>,
    ) -> Result<i32, ExecutorError> {
        let Some((program, rest)) = argv.split_first() else {
            return Err(ExecutorError::NoCommand);
        };
        let command = argv.join(" ");

        let args = StartArguments::on_host(hostname(), std::process::id())
            .command(command.clone())
            .started_at(Utc::now());
        let id = self.client.start(job, args).await.map_err(ExecutorError::Start)?;
        info!(job, %id, command = %command, "execution admitted");

        let child = match self.spawn(program, rest) {
            Ok(child) => child,
            Err(source) => {
                self.report_finish(&id).await;
                return Err(ExecutorError::Spawn { command, source });
            }
        };

        let status = supervise(child, cancel, signals).await;
        self.report_finish(&id).await;

        let status = status.map_err(ExecutorError::Wait)?;
        debug!(job, %id, ?status, "child exited");
        Ok(if status.success() { EXIT_OK } else { EXIT_ERROR })
    }

    fn spawn(&self, program: &str, args: &[String]) -> std::io::Result<Child> {
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(self.stdout.stdio()?)
            .stderr(self.stderr.stdio()?)
            .spawn()
    }

    async fn report_finish(&self, id: &ExecutionId) {
        if let Err(e) = self.client.finish(id).await {
            warn!(%id, error = %e, "failed to report finish");
        }
    }
}

/// Wait for the child while relaying signals to it.
async fn supervise(
    mut child: Child,
    cancel: CancellationToken,
    mut signals: mpsc::Receiver<Signal>,
) -> std::io::Result<ExitStatus> {
    let pid = child.id().map(|raw| Pid::from_raw(raw as i32));
    let mut forwarding = true;

    loop {
        tokio::select! {
            status = child.wait() => return status,
            sig = signals.recv(), if forwarding => match (sig, pid) {
                (Some(sig), Some(pid)) => {
                    debug!(signal = sig.as_str(), %pid, "forwarding signal");
                    if let Err(e) = kill(pid, sig) {
                        warn!(signal = sig.as_str(), error = %e, "failed to forward signal");
                    }
                }
                _ => forwarding = false,
            },
            _ = cancel.cancelled(), if forwarding => {
                debug!("supervision cancelled, waiting for child");
                forwarding = false;
            }
        }
    }
}

fn hostname() -> String {
    nix::unistd::gethostname()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
