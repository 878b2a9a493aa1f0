//! Tests for the engine commands, using a shell script in place of dbmate.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use crate::support::*;

/// Writes a fake dbmate that records its arguments and `DATABASE_URL`.
fn fake_dbmate(t: &Test) -> PathBuf {
    let path = t.dir.path().join("fake-dbmate");
    let script = r#"#!/bin/sh
log="$(dirname "$0")/invocation.txt"
echo "args: $*" > "$log"
echo "url: $DATABASE_URL" >> "$log"
exit "${FAKE_EXIT:-0}"
"#;
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn invocation(t: &Test) -> Option<String> {
    fs::read_to_string(t.dir.path().join("invocation.txt")).ok()
}

#[test]
fn test_migrate_passes_url_through_environment() {
    let t = Test::with_vars(INDIRECT_VARS);
    let dbmate = fake_dbmate(&t);

    let output = t.engine(&dbmate, &["migrate"]);
    assert_success(&output);
    assert_stdout_contains(&output, "migrate complete");

    let log = invocation(&t).expect("engine was not invoked");
    assert!(log.contains(&format!("url: {}", INDIRECT_URL)), "got: {}", log);
    assert!(
        log.contains(
            "args: --env DATABASE_URL --migrations-dir ./db/migrations --schema-file ./db/schema.sql migrate"
        ),
        "got: {}",
        log
    );
    // Credentials stay out of argv.
    assert!(!log.lines().next().unwrap_or_default().contains("s3cret"));
}

#[test]
fn test_engine_options_are_forwarded() {
    let t = Test::with_vars(INDIRECT_VARS);
    let dbmate = fake_dbmate(&t);

    let output = t.engine(
        &dbmate,
        &[
            "--migrations-dir",
            "sql/migrations",
            "--schema-file",
            "sql/schema.sql",
            "--no-dump-schema",
            "rollback",
        ],
    );
    assert_success(&output);

    let log = invocation(&t).unwrap();
    assert!(log.contains(
        "args: --env DATABASE_URL --migrations-dir sql/migrations --schema-file sql/schema.sql --no-dump-schema rollback"
    ));
}

#[test]
fn test_down_alias_runs_rollback() {
    let t = Test::with_vars(INDIRECT_VARS);
    let dbmate = fake_dbmate(&t);

    let output = t.engine(&dbmate, &["down"]);
    assert_success(&output);
    assert!(invocation(&t).unwrap().contains(" rollback"));
}

#[test]
fn test_new_passes_migration_name() {
    let t = Test::with_vars(INDIRECT_VARS);
    let dbmate = fake_dbmate(&t);

    let output = t.engine(&dbmate, &["new", "add_users"]);
    assert_success(&output);
    assert!(invocation(&t).unwrap().contains(" new add_users"));
}

#[test]
fn test_new_without_name_fails_before_engine() {
    let t = Test::with_vars(INDIRECT_VARS);
    let dbmate = fake_dbmate(&t);

    let output = t.engine(&dbmate, &["new"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "a migration name is required");
    assert!(invocation(&t).is_none());
}

#[test]
fn test_every_engine_action_is_delegated() {
    for action in ["up", "create", "drop", "migrate", "rollback", "dump", "wait"] {
        let t = Test::with_vars(INDIRECT_VARS);
        let dbmate = fake_dbmate(&t);

        let output = t.engine(&dbmate, &[action]);
        assert_success(&output);
        let log = invocation(&t).unwrap();
        assert!(log.contains(&format!(" {}\n", action)), "action {}: {}", action, log);
    }
}

#[test]
fn test_engine_failure_exit_code() {
    let t = Test::with_vars(INDIRECT_VARS).var("FAKE_EXIT", "3");
    let dbmate = fake_dbmate(&t);

    let output = t.engine(&dbmate, &["up"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "migration engine `up` exited with status 3");
}

#[test]
fn test_discovery_failure_skips_engine() {
    let t = Test::with_vars(INDIRECT_VARS)
        .var("APP_DB_HOST", "db.service.consul")
        .var("NET_BRIDGE_GW_IP", UNREACHABLE_DNS);
    let dbmate = fake_dbmate(&t);

    let output = t.engine(&dbmate, &["migrate"]);
    assert_failure(&output);
    assert!(invocation(&t).is_none());
}

#[test]
fn test_override_url_reaches_engine_verbatim() {
    let t = Test::new().var("DATABASE_URL", "mysql://root:pw@127.0.0.1:3306/app");
    let dbmate = fake_dbmate(&t);

    let output = t.engine(&dbmate, &["create"]);
    assert_success(&output);
    assert!(invocation(&t)
        .unwrap()
        .contains("url: mysql://root:pw@127.0.0.1:3306/app"));
}
