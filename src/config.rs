//! Configuration for benchmark harness runs.
//!
//! A [`HarnessConfig`] is built once (usually from command-line flags) and
//! handed to [`crate::harness::Harness::new`]. Nothing here reads the
//! environment; callers resolve environment overrides before building it.

use serde::{Deserialize, Serialize};

use crate::LoadBenchError;

/// Iteration count used when none is given.
pub const DEFAULT_ITERATIONS: usize = 10;

/// Which statistics a summary carries besides the average.
///
/// # Examples
///
/// ```rust
/// use loadbench::config::StatsMode;
///
/// assert_eq!(StatsMode::default(), StatsMode::MinMax);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsMode {
    /// Average, fastest and slowest sample.
    #[default]
    MinMax,
    /// Average plus the 50th, 95th and 99th percentile samples.
    ///
    /// Percentiles are taken by index without interpolation, so they are
    /// always one of the recorded samples.
    Percentiles,
}

/// Iteration and reporting parameters for a harness.
///
/// # Default Configuration
///
/// ```rust
/// use loadbench::config::{HarnessConfig, StatsMode};
///
/// let config = HarnessConfig::default();
/// assert_eq!(config.iterations, 10);
/// assert_eq!(config.mode, StatsMode::MinMax);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Number of timed executions per run. Must be positive.
    pub iterations: usize,
    /// Statistics computed over the samples.
    pub mode: StatsMode,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            mode: StatsMode::MinMax,
        }
    }
}

impl HarnessConfig {
    pub fn new(iterations: usize, mode: StatsMode) -> Self {
        Self { iterations, mode }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_mode(mut self, mode: StatsMode) -> Self {
        self.mode = mode;
        self
    }

    /// Rejects configurations that would produce an empty sample set.
    pub fn validate(&self) -> Result<(), LoadBenchError> {
        if self.iterations == 0 {
            return Err(LoadBenchError::InvalidIterations(self.iterations));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = HarnessConfig::default()
            .with_iterations(20)
            .with_mode(StatsMode::Percentiles);
        assert_eq!(config, HarnessConfig::new(20, StatsMode::Percentiles));
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let err = HarnessConfig::default()
            .with_iterations(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, LoadBenchError::InvalidIterations(0)));
    }
}
