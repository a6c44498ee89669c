// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Embedded ordered key/value database.
//!
//! Named buckets map string keys to string values in sorted key order.
//! Readers share a read lock; a single writer at a time runs an update
//! transaction against the in-memory tree, recording an undo log. The
//! transaction commits by appending its operations to the [`Wal`]; if the
//! closure fails or the append fails, the undo log restores the tree.

use fs2::FileExt;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::ops::Bound;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use jg_core::StoreError;

use crate::wal::{Wal, WalOp, FILE_MODE};

/// Bucket holding both job and execution records.
pub const JOBS_BUCKET: &str = "jobs";

/// Default deadline for acquiring the database lock.
pub const DEFAULT_TX_TIMEOUT: Duration = Duration::from_secs(5);

type Tree = BTreeMap<String, String>;
type Buckets = BTreeMap<String, Tree>;

/// Database tuning knobs.
#[derive(Debug, Clone)]
pub struct DbOptions {
    /// How long a transaction waits for the lock before aborting
    pub tx_timeout: Duration,
}

impl Default for DbOptions {
    fn default() -> Self {
        Self { tx_timeout: DEFAULT_TX_TIMEOUT }
    }
}

struct Inner {
    buckets: Buckets,
    wal: Wal,
}

/// Handle to an open database file.
pub struct Db {
    path: PathBuf,
    inner: RwLock<Inner>,
    tx_timeout: Duration,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
}

impl Db {
    /// Open the database at `path` with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_with(path, DbOptions::default())
    }

    /// Open (creating if needed) the database at `path`.
    ///
    /// Takes an exclusive lock on `<path>.lock` so two processes cannot
    /// share one database, then replays the log.
    pub fn open_with(path: impl AsRef<Path>, options: DbOptions) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let lock_path = lock_path(&path);
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .mode(FILE_MODE)
            .open(&lock_path)?;
        lock_file.try_lock_exclusive()?;

        let (wal, entries) = Wal::open(&path)?;
        let mut buckets = Buckets::new();
        let mut ops = 0usize;
        for entry in entries {
            for op in entry.ops {
                apply(&mut buckets, op);
                ops += 1;
            }
        }
        info!(
            path = %path.display(),
            seq = wal.write_seq(),
            ops,
            keys = buckets.values().map(BTreeMap::len).sum::<usize>(),
            "opened database"
        );

        Ok(Self {
            path,
            inner: RwLock::new(Inner { buckets, wal }),
            tx_timeout: options.tx_timeout,
            lock_file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run a read-only transaction.
    pub fn view<T>(
        &self,
        f: impl FnOnce(&ReadTx<'_>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let inner = self.read_lock()?;
        f(&ReadTx { buckets: &inner.buckets })
    }

    /// Run a read-write transaction. Changes are committed if `f` returns
    /// `Ok` and rolled back otherwise.
    pub fn update<T>(
        &self,
        f: impl FnOnce(&mut WriteTx<'_>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut inner = self.write_lock()?;
        let Inner { buckets, wal } = &mut *inner;

        let mut tx = WriteTx { buckets: &mut *buckets, ops: Vec::new(), undo: Vec::new() };
        let result = f(&mut tx);
        let (ops, undo) = (tx.ops, tx.undo);

        let value = match result {
            Ok(value) => value,
            Err(e) => {
                rollback(buckets, undo);
                return Err(e);
            }
        };
        if ops.is_empty() {
            return Ok(value);
        }

        let count = ops.len();
        match wal.append(ops) {
            Ok(seq) => {
                debug!(seq, ops = count, "committed transaction");
                Ok(value)
            }
            Err(e) => {
                rollback(buckets, undo);
                Err(e.into())
            }
        }
    }

    /// Rewrite the log as a single entry holding the live contents.
    pub fn compact(&self) -> Result<(), StoreError> {
        let mut inner = self.write_lock()?;
        let Inner { buckets, wal } = &mut *inner;

        let mut ops = Vec::new();
        for (name, tree) in buckets.iter() {
            ops.push(WalOp::CreateBucket { bucket: name.clone() });
            for (key, value) in tree {
                ops.push(WalOp::Put {
                    bucket: name.clone(),
                    key: key.clone(),
                    value: value.clone(),
                });
            }
        }
        let seq = wal.rewrite(ops)?;
        info!(path = %self.path.display(), seq, "compacted database");
        Ok(())
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner.try_read_for(self.tx_timeout).ok_or(StoreError::Timeout(self.tx_timeout))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner.try_write_for(self.tx_timeout).ok_or(StoreError::Timeout(self.tx_timeout))
    }
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".lock");
    path.with_file_name(name)
}

fn apply(buckets: &mut Buckets, op: WalOp) {
    match op {
        WalOp::CreateBucket { bucket } => {
            buckets.entry(bucket).or_default();
        }
        WalOp::Put { bucket, key, value } => {
            buckets.entry(bucket).or_default().insert(key, value);
        }
        WalOp::Delete { bucket, key } => {
            if let Some(tree) = buckets.get_mut(&bucket) {
                tree.remove(&key);
            }
        }
    }
}

enum Undo {
    DropBucket(String),
    Restore { bucket: String, key: String, prev: Option<String> },
}

fn rollback(buckets: &mut Buckets, undo: Vec<Undo>) {
    for step in undo.into_iter().rev() {
        match step {
            Undo::DropBucket(bucket) => {
                buckets.remove(&bucket);
            }
            Undo::Restore { bucket, key, prev } => {
                if let Some(tree) = buckets.get_mut(&bucket) {
                    match prev {
                        Some(value) => {
                            tree.insert(key, value);
                        }
                        None => {
                            tree.remove(&key);
                        }
                    }
                }
            }
        }
    }
}

fn bucket<'a>(buckets: &'a Buckets, name: &str) -> Result<&'a Tree, StoreError> {
    buckets.get(name).ok_or_else(|| StoreError::BucketNotFound(name.to_string()))
}

fn prefixed<'a>(tree: &'a Tree, prefix: &str) -> impl Iterator<Item = (&'a str, &'a str)> {
    let owned = prefix.to_string();
    tree.range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
        .take_while(move |(k, _)| k.starts_with(&owned))
        .map(|(k, v)| (k.as_str(), v.as_str()))
}

/// Read-only view of the database.
pub struct ReadTx<'a> {
    buckets: &'a Buckets,
}

impl<'a> ReadTx<'a> {
    pub fn get(&self, bucket_name: &str, key: &str) -> Result<Option<&'a str>, StoreError> {
        Ok(bucket(self.buckets, bucket_name)?.get(key).map(String::as_str))
    }

    /// Entries whose key starts with `prefix`, in key order.
    pub fn scan_prefix(
        &self,
        bucket_name: &str,
        prefix: &str,
    ) -> Result<impl Iterator<Item = (&'a str, &'a str)>, StoreError> {
        Ok(prefixed(bucket(self.buckets, bucket_name)?, prefix))
    }
}

/// Read-write transaction. Reads observe the transaction's own writes.
pub struct WriteTx<'a> {
    buckets: &'a mut Buckets,
    ops: Vec<WalOp>,
    undo: Vec<Undo>,
}

impl WriteTx<'_> {
    pub fn create_bucket_if_not_exists(&mut self, name: &str) {
        if self.buckets.contains_key(name) {
            return;
        }
        self.buckets.insert(name.to_string(), Tree::new());
        self.ops.push(WalOp::CreateBucket { bucket: name.to_string() });
        self.undo.push(Undo::DropBucket(name.to_string()));
    }

    pub fn get(&self, bucket_name: &str, key: &str) -> Result<Option<&str>, StoreError> {
        Ok(bucket(self.buckets, bucket_name)?.get(key).map(String::as_str))
    }

    /// Entries whose key starts with `prefix`, copied out so the caller may
    /// mutate while iterating.
    pub fn scan_prefix(
        &self,
        bucket_name: &str,
        prefix: &str,
    ) -> Result<Vec<(String, String)>, StoreError> {
        Ok(prefixed(bucket(self.buckets, bucket_name)?, prefix)
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect())
    }

    pub fn put(&mut self, bucket_name: &str, key: &str, value: String) -> Result<(), StoreError> {
        let tree = self
            .buckets
            .get_mut(bucket_name)
            .ok_or_else(|| StoreError::BucketNotFound(bucket_name.to_string()))?;
        let prev = tree.insert(key.to_string(), value.clone());
        self.undo.push(Undo::Restore {
            bucket: bucket_name.to_string(),
            key: key.to_string(),
            prev,
        });
        self.ops.push(WalOp::Put { bucket: bucket_name.to_string(), key: key.to_string(), value });
        Ok(())
    }

    /// Remove `key`, returning its previous value. Removing an absent key is
    /// a no-op and is not logged.
    pub fn delete(&mut self, bucket_name: &str, key: &str) -> Result<Option<String>, StoreError> {
        let tree = self
            .buckets
            .get_mut(bucket_name)
            .ok_or_else(|| StoreError::BucketNotFound(bucket_name.to_string()))?;
        let Some(prev) = tree.remove(key) else {
            return Ok(None);
        };
        self.undo.push(Undo::Restore {
            bucket: bucket_name.to_string(),
            key: key.to_string(),
            prev: Some(prev.clone()),
        });
        self.ops.push(WalOp::Delete { bucket: bucket_name.to_string(), key: key.to_string() });
        Ok(Some(prev))
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
