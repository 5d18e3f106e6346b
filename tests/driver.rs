//! The put loop and profile runs.

mod common;

use std::time::Duration;

use common::{profile_in, FailingStore};
use syncput_benchmarks::driver::{run, run_with};
use syncput_benchmarks::store::FjallStore;
use syncput_benchmarks::{put_sequential, BenchConfig, BenchError, Payload, PutReport, ReadBack};

#[test]
fn payload_is_filler_bytes() {
    let payload = Payload::filled(10);
    assert_eq!(payload.as_bytes(), b"0000000000");
    assert_eq!(payload.len(), 10);
}

#[test]
fn keys_are_decimal_indices_in_order() {
    let mut store = FailingStore::new(usize::MAX);
    put_sequential(&mut store, 12, &Payload::filled(3)).unwrap();

    let keys: Vec<&str> = store.written.iter().map(|(k, _)| k.as_str()).collect();
    let expected: Vec<String> = (0..12).map(|i| i.to_string()).collect();
    assert_eq!(keys, expected);
    assert!(store.written.iter().all(|(_, len)| *len == 3));
}

#[test]
fn stops_at_first_failed_put() {
    let mut store = FailingStore::new(3);

    let err = put_sequential(&mut store, 10, &Payload::filled(1)).unwrap_err();

    assert_eq!(err.exit_code(), 1);
    match err {
        BenchError::Put { key, .. } => assert_eq!(key, "3"),
        other => panic!("expected put failure, got {other:?}"),
    }
    assert_eq!(store.written.len(), 3);
}

#[test]
fn five_writes_of_ten_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let profile = profile_in(dir.path(), false);
    let config = BenchConfig { count: 5, unit: 10 };

    let outcome = run(&profile, &config).unwrap();

    assert_eq!(outcome.report.count, 5);
    assert_eq!(outcome.report.unit, 10);
    assert!(outcome.cleanup.is_none());

    let store = FjallStore::open(&profile.db_path).unwrap();
    assert_eq!(store.entry_count().unwrap(), 5);
    for i in 0..5 {
        let key = i.to_string();
        assert_eq!(store.value_len(key.as_bytes()).unwrap(), Some(10), "key {key}");
    }
    assert_eq!(store.value_len(b"5").unwrap(), None);
}

#[test]
fn cleanup_profile_removes_database() {
    let dir = tempfile::tempdir().unwrap();
    let profile = profile_in(dir.path(), true);

    let outcome = run(&profile, &BenchConfig { count: 3, unit: 64 }).unwrap();

    assert!(matches!(outcome.cleanup, Some(Ok(n)) if n > 0));
    assert!(!profile.db_path.exists());
}

#[test]
fn persistent_profile_keeps_database() {
    let dir = tempfile::tempdir().unwrap();
    let profile = profile_in(dir.path(), false);

    run(&profile, &BenchConfig { count: 2, unit: 16 }).unwrap();

    assert!(profile.db_path.is_dir());
}

#[test]
fn failed_run_skips_cleanup() {
    let dir = tempfile::tempdir().unwrap();
    let profile = profile_in(dir.path(), true);
    std::fs::create_dir_all(&profile.db_path).unwrap();

    let err = run_with(&profile, &BenchConfig { count: 5, unit: 1 }, |_| Ok(FailingStore::new(2)))
        .unwrap_err();

    assert!(matches!(err, BenchError::Put { ref key, .. } if key == "2"));
    assert!(profile.db_path.exists());
}

#[test]
fn open_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the keyspace directory should be.
    let blocker = dir.path().join("syncput.db");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let profile = profile_in(dir.path(), true);

    let err = run(&profile, &BenchConfig::default()).unwrap_err();

    assert!(matches!(err, BenchError::Open { .. }));
    assert!(err.to_string().starts_with("Open: "));
    assert_eq!(err.exit_code(), 1);
    assert!(blocker.is_file());
}

#[test]
fn report_arithmetic() {
    let report = PutReport {
        count: 100,
        unit: 1024 * 1024,
        elapsed: Duration::from_secs(2),
    };

    assert_eq!(report.total_secs(), 2.0);
    assert_eq!(report.avg_secs(), 0.02);
    assert_eq!(report.ops_per_sec(), 50.0);
    assert_eq!(report.mib_per_sec(), 50.0);

    let text = report.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "total time spend to append+sync all data: 2.000000s",
            "average time spend to write 1024.000KB: 0.020000s",
            "rough throughput: 50.000 MB per second",
        ]
    );
}
