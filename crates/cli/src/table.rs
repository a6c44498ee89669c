// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Column-aligned text tables.

use std::io::Write;

use crate::color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Plain,
    Muted,
    Status,
}

#[derive(Debug, Clone)]
pub struct Column {
    title: &'static str,
    style: Style,
    max: Option<usize>,
}

impl Column {
    pub fn left(title: &'static str) -> Self {
        Self { title, style: Style::Plain, max: None }
    }

    /// Rendered in the muted color.
    pub fn muted(title: &'static str) -> Self {
        Self { title, style: Style::Muted, max: None }
    }

    /// Cells colored by status word.
    pub fn status(title: &'static str) -> Self {
        Self { title, style: Style::Status, max: None }
    }

    /// Truncate cells to `max` characters.
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }
}

pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        let cells = cells
            .into_iter()
            .zip(&self.columns)
            .map(|(cell, col)| match col.max {
                Some(max) => truncate(&cell, max),
                None => cell,
            })
            .collect();
        self.rows.push(cells);
    }

    /// Write the header and rows. Widths are computed before coloring so
    /// escape codes do not skew alignment.
    pub fn render(&self, out: &mut (impl Write + ?Sized)) {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(col.title.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let last = self.columns.len().saturating_sub(1);
        let header: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| pad(&color::header(col.title), col.title.len(), widths[i], i == last))
            .collect();
        let _ = writeln!(out, "{}", header.join("  "));

        for row in &self.rows {
            let line: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let painted = match self.columns[i].style {
                        Style::Plain => cell.clone(),
                        Style::Muted => color::muted(cell),
                        Style::Status => color::status(cell),
                    };
                    pad(&painted, cell.chars().count(), widths[i], i == last)
                })
                .collect();
            let _ = writeln!(out, "{}", line.join("  "));
        }
    }
}

fn pad(painted: &str, visible: usize, width: usize, last: bool) -> String {
    if last {
        return painted.to_string();
    }
    format!("{}{}", painted, " ".repeat(width.saturating_sub(visible)))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", keep)
}
