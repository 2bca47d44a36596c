use serde::{Deserialize, Serialize};

use crate::config::StatsMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    Average,
    Min,
    Max,
    P50,
    P95,
    P99,
}

impl Statistic {
    pub fn label(self) -> &'static str {
        match self {
            Statistic::Average => "Average",
            Statistic::Min => "Min",
            Statistic::Max => "Max",
            Statistic::P50 => "p50",
            Statistic::P95 => "p95",
            Statistic::P99 => "p99",
        }
    }

    /// Rank for percentile statistics, `None` for the others.
    pub fn percentile(self) -> Option<f64> {
        match self {
            Statistic::P50 => Some(0.50),
            Statistic::P95 => Some(0.95),
            Statistic::P99 => Some(0.99),
            _ => None,
        }
    }

    /// Statistics reported for a mode, in print order.
    pub fn for_mode(mode: StatsMode) -> &'static [Statistic] {
        match mode {
            StatsMode::MinMax => &[Statistic::Average, Statistic::Min, Statistic::Max],
            StatsMode::Percentiles => &[
                Statistic::Average,
                Statistic::P50,
                Statistic::P95,
                Statistic::P99,
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    pub statistic: Statistic,
    pub ms: f64,
}

/// Reduced timing statistics for one named run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub name: String,
    pub iterations: usize,
    pub mode: StatsMode,
    pub stats: Vec<StatValue>,
}

impl Summary {
    pub fn get(&self, statistic: Statistic) -> Option<f64> {
        self.stats
            .iter()
            .find(|value| value.statistic == statistic)
            .map(|value| value.ms)
    }

    pub fn mean_ms(&self) -> f64 {
        self.get(Statistic::Average).unwrap_or(0.0)
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: mean={:.3}ms samples={}",
            self.name,
            self.mean_ms(),
            self.iterations
        )
    }

    pub fn within_regression(&self, baseline: &Summary, tolerance: f64) -> bool {
        if self.name != baseline.name {
            return false;
        }
        let allowed = baseline.mean_ms() * (1.0 + tolerance);
        self.mean_ms() <= allowed
    }
}
