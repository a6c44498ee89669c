// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only write-ahead log backing the key/value database.
//!
//! One JSON object per line; each line is one committed transaction, so a
//! transaction is either fully replayed or not at all. A line that fails to
//! decode stops replay: the damaged file is rotated to `.bak` and the valid
//! prefix is rewritten in place.

use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Permission bits requested when the log file is created (before umask).
pub const FILE_MODE: u32 = 0o666;

const MAX_BAK_FILES: u32 = 3;

/// Errors that can occur in WAL operations
#[derive(Debug, Error)]
pub enum WalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<WalError> for jg_core::StoreError {
    fn from(e: WalError) -> Self {
        match e {
            WalError::Io(e) => jg_core::StoreError::Io(e),
            WalError::Json(e) => jg_core::StoreError::Json(e),
        }
    }
}

/// A single mutation inside a committed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalOp {
    CreateBucket { bucket: String },
    Put { bucket: String, key: String, value: String },
    Delete { bucket: String, key: String },
}

/// One committed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalEntry {
    pub seq: u64,
    pub ops: Vec<WalOp>,
}

/// Open write-ahead log file.
pub struct Wal {
    path: PathBuf,
    file: File,
    write_seq: u64,
    /// Length of the file up to the end of the last committed entry
    committed_len: u64,
}

impl Wal {
    /// Open (creating if needed) the log at `path` and return the entries
    /// to replay.
    pub fn open(path: &Path) -> Result<(Self, Vec<WalEntry>), WalError> {
        let mut file = open_append(path)?;
        let scan = scan(path)?;

        if scan.corrupt {
            let bak = rotate_bak_path(path);
            warn!(
                path = %path.display(),
                bak = %bak.display(),
                valid_entries = scan.entries.len(),
                "corrupt log, keeping valid prefix and rotating damaged file"
            );
            drop(file);
            fs::rename(path, &bak)?;
            write_entries(path, &scan.entries)?;
            file = open_append(path)?;
        } else if scan.unterminated {
            drop(file);
            write_entries(path, &scan.entries)?;
            file = open_append(path)?;
        }

        let write_seq = scan.entries.last().map(|e| e.seq).unwrap_or(0);
        let committed_len = file.metadata()?.len();
        Ok((Self { path: path.to_path_buf(), file, write_seq, committed_len }, scan.entries))
    }

    /// Append one transaction and sync it to disk. Returns its sequence number.
    ///
    /// Bytes past the last committed entry (left by an append that failed
    /// part way) are truncated first, and a failed append truncates its own
    /// partial write, so every entry starts on a fresh line.
    pub fn append(&mut self, ops: Vec<WalOp>) -> Result<u64, WalError> {
        let entry = WalEntry { seq: self.write_seq + 1, ops };
        let mut line = serde_json::to_vec(&entry)?;
        line.push(b'\n');

        if let Err(e) = self.write_line(&line) {
            if let Err(trunc) = self.file.set_len(self.committed_len) {
                warn!(path = %self.path.display(), error = %trunc, "failed to truncate partial append");
            }
            return Err(e.into());
        }
        self.committed_len += line.len() as u64;
        self.write_seq = entry.seq;
        Ok(entry.seq)
    }

    fn write_line(&mut self, line: &[u8]) -> std::io::Result<()> {
        if self.file.metadata()?.len() != self.committed_len {
            warn!(path = %self.path.display(), committed_len = self.committed_len, "discarding partial append");
            self.file.set_len(self.committed_len)?;
        }
        self.file.write_all(line)?;
        self.file.sync_data()
    }

    /// Atomically replace the whole log with a single entry holding `ops`.
    pub fn rewrite(&mut self, ops: Vec<WalOp>) -> Result<u64, WalError> {
        let entry = WalEntry { seq: self.write_seq + 1, ops };
        write_entries(&self.path, std::slice::from_ref(&entry))?;
        self.file = open_append(&self.path)?;
        self.committed_len = self.file.metadata()?.len();
        self.write_seq = entry.seq;
        Ok(entry.seq)
    }

    /// Sequence number of the last committed entry.
    pub fn write_seq(&self) -> u64 {
        self.write_seq
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

struct Scan {
    entries: Vec<WalEntry>,
    corrupt: bool,
    unterminated: bool,
}

fn scan(path: &Path) -> Result<Scan, WalError> {
    let data = fs::read(path)?;
    let mut entries = Vec::new();
    let mut corrupt = false;
    let unterminated = data.last().is_some_and(|b| *b != b'\n');

    for line in data.split(|b| *b == b'\n').filter(|l| !l.is_empty()) {
        let parsed = std::str::from_utf8(line)
            .ok()
            .and_then(|s| serde_json::from_str::<WalEntry>(s).ok());
        match parsed {
            Some(entry) => entries.push(entry),
            None => {
                corrupt = true;
                break;
            }
        }
    }

    Ok(Scan { entries, corrupt, unterminated })
}

fn open_append(path: &Path) -> Result<File, WalError> {
    Ok(OpenOptions::new().create(true).append(true).mode(FILE_MODE).open(path)?)
}

/// Write `entries` to a sibling temp file and rename it over `path`.
fn write_entries(path: &Path, entries: &[WalEntry]) -> Result<(), WalError> {
    let tmp = path.with_extension("tmp");
    {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .mode(FILE_MODE)
            .open(&tmp)?;
        for entry in entries {
            let mut line = serde_json::to_vec(entry)?;
            line.push(b'\n');
            file.write_all(&line)?;
        }
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Pick the next `.bak` / `.bak.N` path, rotating older backups out.
///
/// Keeps up to [`MAX_BAK_FILES`] backups: `.bak`, `.bak.2`, `.bak.3`.
pub(crate) fn rotate_bak_path(path: &Path) -> PathBuf {
    let bak = |n: u32| {
        if n == 1 {
            path.with_extension("bak")
        } else {
            path.with_extension(format!("bak.{n}"))
        }
    };

    let oldest = bak(MAX_BAK_FILES);
    if oldest.exists() {
        let _ = fs::remove_file(&oldest);
    }

    for n in (1..MAX_BAK_FILES).rev() {
        let src = bak(n);
        if src.exists() {
            let _ = fs::rename(&src, bak(n + 1));
        }
    }

    bak(1)
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
