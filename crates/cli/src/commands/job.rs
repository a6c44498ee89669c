// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jg job` - Job management commands

use std::io::Write;

use anyhow::Result;
use clap::{Args, Subcommand};

use jg_core::{JobAction, JobStatus, LockMode};
use jg_wire::CreateJobRequest;

use crate::client::HttpClient;
use crate::color;
use crate::output::{format_execution_list, format_job_list, format_or_json, handle_list, OutputFormat};

#[derive(Args)]
pub struct JobArgs {
    #[command(subcommand)]
    pub command: JobCommand,
}

#[derive(Subcommand)]
pub enum JobCommand {
    /// Register a new job
    Create {
        /// Unique job name
        name: String,

        /// Admission rule: free, host or cluster
        #[arg(short = 'l', long, default_value = "host", value_parser = parse_lock_mode)]
        lock_mode: LockMode,

        /// Create the job paused
        #[arg(long)]
        paused: bool,
    },
    /// List jobs
    List,
    /// Show a job and its executions
    Get {
        name: String,
    },
    /// Delete a job with no running executions
    Delete {
        name: String,
    },
    /// Stop admitting new executions
    Pause {
        name: String,
    },
    /// Resume admitting executions
    Start {
        name: String,
    },
}

fn parse_lock_mode(s: &str) -> Result<LockMode, String> {
    s.parse().map_err(|e: jg_core::Error| e.to_string())
}

pub async fn handle(command: JobCommand, client: &HttpClient, format: OutputFormat) -> Result<()> {
    match command {
        JobCommand::Create { name, lock_mode, paused } => {
            let mut request = CreateJobRequest::new(name, lock_mode);
            if paused {
                request = request.status(JobStatus::Paused);
            }
            let job = client.create_job(&request).await?;
            format_or_json(format, &job, || {
                println!("Job '{}' created ({}, {})", color::header(&job.name), job.lock_mode, color::status(job.status.as_str()));
            })?;
        }
        JobCommand::List => {
            let jobs = client.list_jobs().await?;
            handle_list(format, &jobs, "No jobs found", |items, out| format_job_list(out, items))?;
        }
        JobCommand::Get { name } => {
            let detail = client.get_job(&name).await?;
            format_or_json(format, &detail, || {
                let job = &detail.job;
                let mut out = std::io::stdout();
                let _ = writeln!(out, "{} {}", color::header("Job:"), job.name);
                let _ = writeln!(out, "  Lock mode: {}", job.lock_mode);
                let _ = writeln!(out, "  Status:    {}", color::status(job.status.as_str()));
                let _ = writeln!(out, "  Created:   {}", crate::output::format_time(&job.created_at));
                let _ = writeln!(out);
                if detail.executions.is_empty() {
                    let _ = writeln!(out, "No executions");
                } else {
                    let _ = writeln!(out, "{}", color::header("Executions:"));
                    format_execution_list(&mut out, &detail.executions);
                }
            })?;
        }
        JobCommand::Delete { name } => {
            client.delete_job(&name).await?;
            format_or_json(format, &serde_json::json!({ "deleted": name }), || {
                println!("Job '{}' deleted", color::header(&name));
            })?;
        }
        JobCommand::Pause { name } => action(client, format, &name, JobAction::Pause).await?,
        JobCommand::Start { name } => action(client, format, &name, JobAction::Start).await?,
    }
    Ok(())
}

async fn action(client: &HttpClient, format: OutputFormat, name: &str, action: JobAction) -> Result<()> {
    let job = client.job_action(name, action).await?;
    format_or_json(format, &job, || {
        println!("Job '{}' is now {}", color::header(&job.name), color::status(job.status.as_str()));
    })
}
