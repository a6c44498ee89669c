// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text and JSON rendering for `jg` commands.

use std::io::Write;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use jg_core::{Execution, Job};

use crate::table::{Column, Table};

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render a list as text table or JSON. Handles empty check + format branch.
pub fn handle_list<T: Serialize>(
    format: OutputFormat,
    items: &[T],
    empty_msg: &str,
    render_text: impl FnOnce(&[T], &mut dyn Write),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
        OutputFormat::Text if items.is_empty() => println!("{}", empty_msg),
        OutputFormat::Text => render_text(items, &mut std::io::stdout()),
    }
    Ok(())
}

/// Renders as JSON when `format` is `Json`, otherwise calls `text_fn`.
pub fn format_or_json<T: Serialize>(
    format: OutputFormat,
    data: &T,
    text_fn: impl FnOnce(),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Text => text_fn(),
    }
    Ok(())
}

/// RFC 3339 at second precision.
pub fn format_time(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

pub fn format_job_list(out: &mut (impl Write + ?Sized), jobs: &[Job]) {
    let mut table = Table::new(vec![
        Column::left("NAME").with_max(32),
        Column::left("LOCK MODE"),
        Column::status("STATUS"),
        Column::left("CREATED"),
    ]);
    for job in jobs {
        table.row(vec![
            job.name.clone(),
            job.lock_mode.to_string(),
            job.status.to_string(),
            format_time(&job.created_at),
        ]);
    }
    table.render(out);
}

pub fn format_execution_list(out: &mut (impl Write + ?Sized), executions: &[Execution]) {
    let mut table = Table::new(vec![
        Column::muted("ID"),
        Column::left("HOST").with_max(24),
        Column::left("PID"),
        Column::status("STATUS"),
        Column::left("STARTED"),
        Column::left("COMMAND").with_max(50),
    ]);
    for e in executions {
        table.row(vec![
            e.id.to_string(),
            e.host.clone().unwrap_or_else(|| "-".to_string()),
            e.pid.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
            e.status.to_string(),
            format_time(&e.started_at),
            e.command.clone().unwrap_or_default(),
        ]);
    }
    table.render(out);
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
