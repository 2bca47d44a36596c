use std::fs;

use loadbench::{LoadBenchError, StatsMode, baseline::BaselineStore, harness::summarize};

#[test]
fn test_missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = BaselineStore::new(dir.path().join("absent.json"));
    assert!(store.load().unwrap().is_empty());
    assert!(store.find("anything").unwrap().is_none());
}

#[test]
fn test_record_then_find_round_trips_summary() {
    let dir = tempfile::tempdir().unwrap();
    let store = BaselineStore::new(dir.path().join("baseline.json"));
    let summary = summarize(
        "Automerge 2 Load (small.tnd)",
        vec![1.0, 2.0, 4.5],
        StatsMode::Percentiles,
    )
    .unwrap();
    store.record(std::slice::from_ref(&summary)).unwrap();
    assert_eq!(store.find(&summary.name).unwrap(), Some(summary));
}

#[test]
fn test_record_replaces_same_name_and_sorts() {
    let dir = tempfile::tempdir().unwrap();
    let store = BaselineStore::new(dir.path().join("baseline.json"));
    let b = summarize("b", vec![1.0], StatsMode::MinMax).unwrap();
    let a_old = summarize("a", vec![1.0], StatsMode::MinMax).unwrap();
    let a_new = summarize("a", vec![9.0], StatsMode::MinMax).unwrap();
    store.record(&[b, a_old]).unwrap();
    store.record(&[a_new.clone()]).unwrap();
    let runs = store.load().unwrap();
    assert_eq!(
        runs.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        vec!["a", "b"]
    );
    assert_eq!(runs[0], a_new);
}

#[test]
fn test_empty_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("baseline.json");
    fs::write(&path, b"").unwrap();
    assert!(BaselineStore::new(path).load().unwrap().is_empty());
}

#[test]
fn test_corrupt_file_is_a_baseline_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("baseline.json");
    fs::write(&path, b"{not json").unwrap();
    let err = BaselineStore::new(path).load().unwrap_err();
    assert!(matches!(err, LoadBenchError::Baseline(_)));
}
