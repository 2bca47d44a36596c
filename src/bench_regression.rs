use std::collections::HashMap;

use crate::bench_meta::{Statistic, Summary};

/// Signed percentage change of `current` against `previous`.
///
/// Returns `None` when `previous` is zero since no ratio exists.
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

/// Formats a percentage change with two decimals, `+` prefixed when positive.
pub fn format_change(change: f64) -> String {
    if change > 0.0 {
        format!("+{change:.2}%")
    } else {
        format!("{change:.2}%")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatDelta {
    pub statistic: Statistic,
    pub current_ms: f64,
    pub baseline_ms: f64,
    pub change: Option<f64>,
}

impl StatDelta {
    pub fn annotation(&self) -> String {
        match self.change {
            Some(change) => format_change(change),
            None => "n/a".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub name: String,
    pub baseline_name: String,
    pub deltas: Vec<StatDelta>,
}

impl Comparison {
    pub fn delta(&self, statistic: Statistic) -> Option<&StatDelta> {
        self.deltas.iter().find(|d| d.statistic == statistic)
    }
}

/// Compares every statistic of `current` that `baseline` also carries.
pub fn compare(current: &Summary, baseline: &Summary) -> Comparison {
    let deltas = current
        .stats
        .iter()
        .filter_map(|value| {
            let previous = baseline.get(value.statistic)?;
            Some(StatDelta {
                statistic: value.statistic,
                current_ms: value.ms,
                baseline_ms: previous,
                change: percent_change(value.ms, previous),
            })
        })
        .collect();
    Comparison {
        name: current.name.clone(),
        baseline_name: baseline.name.clone(),
        deltas,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BenchGateConfig {
    pub baseline: Vec<Summary>,
    /// Allowed mean growth over the baseline as a fraction (0.05 = 5%).
    pub tolerance: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GateReport {
    pub passed: bool,
    pub reasons: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct BenchGate {
    baseline: HashMap<String, Summary>,
    tolerance: f64,
}

impl BenchGate {
    pub fn new(config: BenchGateConfig) -> Self {
        let baseline = config
            .baseline
            .into_iter()
            .map(|run| (run.name.clone(), run))
            .collect();
        Self {
            baseline,
            tolerance: config.tolerance,
        }
    }

    /// Fails every run whose mean grew past the tolerance over its stored
    /// baseline. Runs without a baseline entry pass.
    pub fn evaluate(&self, runs: &[Summary]) -> GateReport {
        let mut reasons = Vec::new();
        for run in runs {
            let Some(baseline) = self.baseline.get(&run.name) else {
                continue;
            };
            if !run.within_regression(baseline, self.tolerance) {
                reasons.push(format!(
                    "{} regression: current={:.3}ms baseline={:.3}ms tolerance={}",
                    run.name,
                    run.mean_ms(),
                    baseline.mean_ms(),
                    self.tolerance
                ));
            }
        }
        GateReport {
            passed: reasons.is_empty(),
            reasons,
        }
    }
}
