// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jg_core::test_support::running;
use tempfile::tempdir;

fn storage(dir: &std::path::Path) -> ExecutionStorage {
    ExecutionStorage::new(Arc::new(Db::open(dir.join("data.db")).unwrap())).unwrap()
}

#[test]
fn put_then_get_by_id() {
    let dir = tempdir().unwrap();
    let executions = storage(dir.path());
    let e = running("backup", "web-1", 10);

    executions.put_execution(&e).unwrap();

    assert_eq!(executions.get_execution(&e.id).unwrap(), Some(e));
}

#[test]
fn get_unknown_id_is_none() {
    let dir = tempdir().unwrap();
    let executions = storage(dir.path());
    executions.put_execution(&running("backup", "web-1", 10)).unwrap();

    assert!(executions.get_execution(&ExecutionId::new()).unwrap().is_none());
}

#[test]
fn same_host_and_pid_overwrites() {
    let dir = tempdir().unwrap();
    let executions = storage(dir.path());
    let first = running("backup", "web-1", 10);
    let second = running("backup", "web-1", 10);

    executions.put_execution(&first).unwrap();
    executions.put_execution(&second).unwrap();

    let listed = executions.list_executions("backup").unwrap();
    assert_eq!(listed, vec![second]);
}

#[test]
fn list_is_scoped_to_one_job() {
    let dir = tempdir().unwrap();
    let executions = storage(dir.path());
    for e in [running("a", "h", 2), running("ab", "h", 1), running("a", "g", 1), running("b", "h", 1)] {
        executions.put_execution(&e).unwrap();
    }

    let hosts: Vec<_> = executions
        .list_executions("a")
        .unwrap()
        .into_iter()
        .map(|e| (e.host.unwrap_or_default(), e.pid.unwrap_or(0)))
        .collect();
    assert_eq!(hosts, vec![("g".to_string(), 1), ("h".to_string(), 2)]);
}

#[test]
fn delete_by_id_removes_and_returns_record() {
    let dir = tempdir().unwrap();
    let executions = storage(dir.path());
    let e = running("backup", "web-1", 10);
    executions.put_execution(&e).unwrap();

    let removed = executions.delete_execution(&e.id).unwrap();

    assert_eq!(removed, Some(e.clone()));
    assert!(executions.get_execution(&e.id).unwrap().is_none());
    assert!(executions.delete_execution(&e.id).unwrap().is_none());
}

#[test]
fn delete_by_job_leaves_other_jobs() {
    let dir = tempdir().unwrap();
    let executions = storage(dir.path());
    for e in [running("a", "h", 1), running("a", "h", 2), running("ab", "h", 1)] {
        executions.put_execution(&e).unwrap();
    }

    assert_eq!(executions.delete_executions_by_job("a").unwrap(), 2);
    assert!(executions.list_executions("a").unwrap().is_empty());
    assert_eq!(executions.list_executions("ab").unwrap().len(), 1);
    assert_eq!(executions.delete_executions_by_job("a").unwrap(), 0);
}
