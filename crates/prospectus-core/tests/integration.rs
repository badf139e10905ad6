//! End-to-end tests against real check programs
//!
//! Each test writes small shell scripts into a temporary
//! `.prospectus.d` directory and drives discovery, execution and fixing
//! through the subprocess protocol.

#![cfg(unix)]

use prospectus_core::{
    Check, CheckResult, Expectation, Loader, ProcessProtocol, ProspectusError, ResultSet,
};
use std::collections::BTreeMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DISK_CHECK: &str = r#"#!/bin/sh
input=$(cat)
case "$1" in
  load)
    echo '[{"name":"free-space","metadata":{"path":"/"}},{"name":"inodes","dir":"/elsewhere","file":"/bin/false"}]'
    ;;
  execute)
    case "$input" in
      *'"name":"free-space"'*)
        echo '{"actual":"90%","expected":{"type":"regex","data":{"pattern":"^[0-8]?[0-9]%$"}}}'
        ;;
      *)
        echo '{"actual":"ok","expected":{"type":"equals","data":{"value":"ok"}}}'
        ;;
    esac
    ;;
  fix)
    case "$input" in
      *'"actual":"90%"'*)
        echo '{"actual":"40%","expected":{"type":"regex","data":{"pattern":"^[0-8]?[0-9]%$"}}}'
        ;;
      *)
        exit 1
        ;;
    esac
    ;;
  *)
    exit 2
    ;;
esac
"#;

const BROKEN_CHECK: &str = r#"#!/bin/sh
cat >/dev/null
case "$1" in
  load) echo '[{"name":"crashes"},{"name":"garbles"}]' ;;
  *) exit 1 ;;
esac
"#;

const GARBLED_CHECK: &str = r#"#!/bin/sh
cat >/dev/null
case "$1" in
  load) echo '[{"name":"garbles"}]' ;;
  execute) echo '{"actual": 5' ;;
esac
"#;

fn target(programs: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    let discovery = dir.path().join(".prospectus.d");
    fs::create_dir(&discovery).unwrap();
    for (name, body) in programs {
        let path = discovery.join(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
    dir
}

fn program(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(".prospectus.d").join(name)
}

#[test]
fn test_discovery_stamps_every_descriptor() {
    let app = target(&[("disk.check", DISK_CHECK)]);

    let checks = Loader::new().new_set([app.path()]).unwrap();

    assert_eq!(checks.len(), 2);
    assert_eq!(checks[0].name, "free-space");
    assert_eq!(checks[0].metadata.get("path").map(String::as_str), Some("/"));
    assert_eq!(checks[1].name, "inodes");
    assert!(checks[1].metadata.is_empty());
    for check in checks.iter() {
        assert_eq!(check.dir, app.path());
        assert_eq!(check.file, program(&app, "disk.check"));
    }
}

#[test]
fn test_execute_and_filter_drift() {
    let app = target(&[("disk.check", DISK_CHECK)]);
    let protocol = ProcessProtocol::new();

    let checks = Loader::new().new_set([app.path()]).unwrap();
    let results = checks.execute(&protocol);

    assert_eq!(results.len(), checks.len());
    for (result, check) in results.iter().zip(checks.iter()) {
        assert_eq!(&result.check, check);
    }

    let changed = results.changed();
    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].check.name, "free-space");
    assert_eq!(changed[0].actual, "90%");

    let line = format!("{}::free-space: 90% / /^[0-8]?[0-9]%$/", app.path().display());
    assert_eq!(changed.to_string(), line);
}

#[test]
fn test_fix_returns_program_reported_result() {
    let app = target(&[("disk.check", DISK_CHECK)]);
    let protocol = ProcessProtocol::new();

    let checks = Loader::new().new_set([app.path()]).unwrap();
    let drifted = checks.execute(&protocol).changed();
    let fixed = drifted.fix(&protocol);

    assert_eq!(fixed.len(), 1);
    assert_eq!(fixed[0].actual, "40%");
    assert!(fixed[0].matches());
    assert_eq!(fixed[0].check, drifted[0].check);
}

#[test]
fn test_fix_failure_is_isolated() {
    let app = target(&[("disk.check", DISK_CHECK)]);
    let checks = Loader::new().new_set([app.path()]).unwrap();

    let not_drifted = CheckResult {
        actual: "ok".into(),
        expected: Expectation::Equals { value: "ok".into() },
        check: checks[1].clone(),
    };
    let fixed = not_drifted.fix(&ProcessProtocol::new());
    assert!(fixed.is_error());
    assert!(fixed.expected.to_string().starts_with("fix error: "));
}

#[test]
fn test_runtime_failures_become_error_results() {
    let broken = target(&[("broken.check", BROKEN_CHECK)]);
    let garbled = target(&[("garbled.check", GARBLED_CHECK)]);
    let app = target(&[("disk.check", DISK_CHECK)]);

    let checks = Loader::new()
        .new_set([broken.path(), garbled.path(), app.path()])
        .unwrap();
    assert_eq!(checks.len(), 5);

    let results = checks.execute(&ProcessProtocol::new());
    assert_eq!(results.len(), 5);

    for result in &results[..3] {
        assert_eq!(result.actual, "error");
        match &result.expected {
            Expectation::Error { msg } => {
                assert!(msg.starts_with("execute error: "), "{}", msg);
            }
            other => panic!("expected error, got {:?}", other),
        }
    }
    assert_eq!(results[3].actual, "90%");
    assert!(results[4].matches());

    let changed: Vec<_> = results.changed().iter().map(|r| r.check.name.clone()).collect();
    assert_eq!(changed, vec!["crashes", "garbles", "garbles", "free-space"]);
}

#[test]
fn test_missing_program_execute() {
    let dir = TempDir::new().unwrap();
    let check = Check {
        dir: dir.path().to_path_buf(),
        file: dir.path().join("does-not-exist"),
        name: "ghost".into(),
        metadata: BTreeMap::new(),
    };

    let result = check.execute(&ProcessProtocol::new());
    assert_eq!(result.actual, "error");
    assert!(!result.matches());
    assert!(result.expected.to_string().contains("execute error:"));

    let set: ResultSet = vec![result].into();
    assert_eq!(set.changed().len(), 1);
}

#[test]
fn test_non_executable_program_execute() {
    let app = target(&[]);
    let path = program(&app, "plain.txt");
    fs::write(&path, "not a program").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    let check = Check {
        dir: app.path().to_path_buf(),
        file: path,
        name: "plain".into(),
        metadata: BTreeMap::new(),
    };
    let result = check.execute(&ProcessProtocol::new());
    assert!(result.is_error());
}

#[test]
fn test_failing_load_aborts_discovery() {
    let good = target(&[("disk.check", DISK_CHECK)]);
    let bad = target(&[("bad.check", "#!/bin/sh\nexit 7\n")]);

    let err = Loader::new()
        .new_set([good.path(), bad.path()])
        .unwrap_err();
    assert!(matches!(err, ProspectusError::Load { .. }));
    assert!(err.to_string().contains("bad.check"));
}

#[test]
fn test_missing_discovery_directory() {
    let empty = TempDir::new().unwrap();
    let err = Loader::new().new_set([empty.path()]).unwrap_err();
    assert!(matches!(err, ProspectusError::DirectoryRead { .. }));
}

#[test]
fn test_result_set_json_round_trip() {
    let app = target(&[("disk.check", DISK_CHECK)]);
    let checks = Loader::new().new_set([app.path()]).unwrap();
    let results = checks.execute(&ProcessProtocol::new());

    let json = results.to_json().unwrap();
    let decoded: ResultSet = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, results);
}

#[test]
fn test_relative_target_directory() {
    let app = target(&[("disk.check", DISK_CHECK)]);
    let cwd = std::env::current_dir().unwrap();
    let relative = pathdiff(app.path(), &cwd);

    let checks = Loader::new().new_set([&relative]).unwrap();
    assert!(checks.iter().all(|c| c.dir.as_path() == app.path()));
}

/// Build a relative path from `base` to `path` through the filesystem root
fn pathdiff(path: &Path, base: &Path) -> PathBuf {
    let mut relative = PathBuf::new();
    for _ in base.components().skip(1) {
        relative.push("..");
    }
    relative.join(path.strip_prefix("/").unwrap())
}
