use loadbench::{
    StatValue, Statistic, StatsMode, Summary,
    bench_regression::{BenchGate, BenchGateConfig, compare, format_change, percent_change},
};

fn run(name: &str, mean_ms: f64) -> Summary {
    Summary {
        name: name.into(),
        iterations: 10,
        mode: StatsMode::MinMax,
        stats: vec![
            StatValue {
                statistic: Statistic::Average,
                ms: mean_ms,
            },
            StatValue {
                statistic: Statistic::Min,
                ms: mean_ms * 0.8,
            },
            StatValue {
                statistic: Statistic::Max,
                ms: mean_ms * 1.2,
            },
        ],
    }
}

#[test]
fn test_percent_change_formatting() {
    assert_eq!(format_change(percent_change(110.0, 100.0).unwrap()), "+10.00%");
    assert_eq!(format_change(percent_change(90.0, 100.0).unwrap()), "-10.00%");
    assert_eq!(format_change(percent_change(100.0, 100.0).unwrap()), "0.00%");
}

#[test]
fn test_percent_change_against_zero_is_undefined() {
    assert_eq!(percent_change(5.0, 0.0), None);
}

#[test]
fn test_compare_covers_shared_statistics() {
    let comparison = compare(&run("v3", 12.0), &run("v2", 10.0));
    assert_eq!(comparison.name, "v3");
    assert_eq!(comparison.baseline_name, "v2");
    assert_eq!(comparison.deltas.len(), 3);
    let average = comparison.delta(Statistic::Average).unwrap();
    assert_eq!(average.baseline_ms, 10.0);
    assert_eq!(average.annotation(), "+20.00%");
    assert!(comparison.delta(Statistic::P99).is_none());
}

#[test]
fn test_gate_passes_within_tolerance() {
    let gate = BenchGate::new(BenchGateConfig {
        baseline: vec![run("load_small", 1.0), run("load_large", 50.0)],
        tolerance: 0.05,
    });
    let report = gate.evaluate(&[run("load_small", 1.04), run("load_large", 45.0)]);
    assert!(report.passed);
    assert!(report.reasons.is_empty());
}

#[test]
fn test_gate_reports_each_regressed_run() {
    let gate = BenchGate::new(BenchGateConfig {
        baseline: vec![run("load_small", 1.5), run("load_large", 50.0)],
        tolerance: 0.10,
    });
    let report = gate.evaluate(&[run("load_small", 2.5), run("load_large", 60.0)]);
    assert!(!report.passed);
    assert_eq!(report.reasons.len(), 2);
    assert!(
        report.reasons[0].starts_with("load_small regression: current=2.500ms baseline=1.500ms")
    );
    assert!(report.reasons[1].starts_with("load_large regression: "));
}

#[test]
fn test_gate_zero_tolerance_allows_equal_mean() {
    let gate = BenchGate::new(BenchGateConfig {
        baseline: vec![run("load_small", 2.0)],
        tolerance: 0.0,
    });
    assert!(gate.evaluate(&[run("load_small", 2.0)]).passed);
    assert!(!gate.evaluate(&[run("load_small", 2.5)]).passed);
}

#[test]
fn test_gate_ignores_runs_without_baseline() {
    let gate = BenchGate::new(BenchGateConfig {
        baseline: vec![run("load_small", 1.0)],
        tolerance: 0.0,
    });
    assert!(gate.evaluate(&[run("load_large", 100.0)]).passed);
}
