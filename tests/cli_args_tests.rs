use std::path::PathBuf;

use loadbench::{
    LibraryVersion, LoadBenchError, StatsMode,
    cli::{BenchArgs, ProbeArgs},
};

#[test]
fn test_probe_args_parse_heap_flag_anywhere() {
    let args = ProbeArgs::from_args(&["loadprobe", "--heap", "3", "doc.tnd"]).unwrap();
    assert_eq!(args.version, LibraryVersion::V3);
    assert_eq!(args.path, PathBuf::from("doc.tnd"));
    assert!(args.heap_dump);
}

#[test]
fn test_probe_args_require_two_positionals() {
    let err = ProbeArgs::from_args(&["loadprobe", "2"]).unwrap_err();
    assert!(err.is_usage_error());
    let err = ProbeArgs::from_args(&["loadprobe", "2", "a.tnd", "b.tnd"]).unwrap_err();
    assert!(matches!(err, LoadBenchError::InvalidArguments(_)));
}

#[test]
fn test_probe_args_reject_unknown_version() {
    let err = ProbeArgs::from_args(&["loadprobe", "1", "a.tnd"]).unwrap_err();
    assert!(matches!(err, LoadBenchError::InvalidVersion(ref v) if v == "1"));
}

#[test]
fn test_bench_args_defaults() {
    let args = BenchArgs::from_args(&["loadbench", "a.tnd"], None).unwrap();
    assert_eq!(args.files, vec![PathBuf::from("a.tnd")]);
    assert_eq!(args.harness.iterations, 10);
    assert_eq!(args.harness.mode, StatsMode::MinMax);
    assert_eq!(args.versions, vec![LibraryVersion::V2, LibraryVersion::V3]);
    assert!(args.baseline.is_none());
    assert!(args.tolerance.is_none());
}

#[test]
fn test_bench_args_flags() {
    let args = BenchArgs::from_args(
        &[
            "loadbench",
            "-n",
            "20",
            "--percentiles",
            "--versions",
            "3",
            "--tolerance",
            "5",
            "--save-baseline",
            "out.json",
            "a.tnd",
            "b.tnd",
        ],
        Some(PathBuf::from("env.json")),
    )
    .unwrap();
    assert_eq!(args.harness.iterations, 20);
    assert_eq!(args.harness.mode, StatsMode::Percentiles);
    assert_eq!(args.versions, vec![LibraryVersion::V3]);
    assert_eq!(args.tolerance, Some(0.05));
    assert_eq!(args.baseline, Some(PathBuf::from("env.json")));
    assert_eq!(args.save_baseline, Some(PathBuf::from("out.json")));
    assert_eq!(args.files.len(), 2);
}

#[test]
fn test_bench_args_explicit_baseline_overrides_default() {
    let args = BenchArgs::from_args(
        &["loadbench", "--baseline", "flag.json", "a.tnd"],
        Some(PathBuf::from("env.json")),
    )
    .unwrap();
    assert_eq!(args.baseline, Some(PathBuf::from("flag.json")));
}

#[test]
fn test_bench_args_errors() {
    assert!(matches!(
        BenchArgs::from_args(&["loadbench", "--iterations", "0", "a.tnd"], None),
        Err(LoadBenchError::InvalidIterations(0))
    ));
    assert!(BenchArgs::from_args(&["loadbench", "--iterations", "-3", "a.tnd"], None).is_err());
    assert!(BenchArgs::from_args(&["loadbench", "--iterations"], None).is_err());
    assert!(BenchArgs::from_args(&["loadbench"], None).is_err());
    assert!(BenchArgs::from_args(&["loadbench", "--versions", "2,5", "a.tnd"], None).is_err());
    assert!(BenchArgs::from_args(&["loadbench", "--bogus", "a.tnd"], None).is_err());
}

#[test]
fn test_bench_args_tolerance_requires_baseline() {
    let err = BenchArgs::from_args(&["loadbench", "--tolerance", "0", "a.tnd"], None).unwrap_err();
    assert!(err.is_usage_error());
    assert!(err.to_string().contains("--tolerance requires --baseline"));

    let args = BenchArgs::from_args(
        &["loadbench", "--tolerance", "0", "a.tnd"],
        Some(PathBuf::from("env.json")),
    )
    .unwrap();
    assert_eq!(args.tolerance, Some(0.0));
}

#[test]
fn test_bench_args_reject_repeated_file() {
    let err = BenchArgs::from_args(&["loadbench", "a/doc.tnd", "a/doc.tnd"], None).unwrap_err();
    assert!(matches!(err, LoadBenchError::InvalidArguments(_)));

    let args = BenchArgs::from_args(&["loadbench", "a/doc.tnd", "b/doc.tnd"], None).unwrap();
    assert_eq!(args.files.len(), 2);
}
