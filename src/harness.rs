//! Timing harness for black-box operations.
//!
//! A run executes the operation `iterations` times back to back, records one
//! wall-clock sample per execution and reduces the samples to a [`Summary`].
//! Runs are strictly sequential; nothing here spawns threads.

use std::{
    io::{self, Write},
    time::Instant,
};

use tracing::{debug, info};

use crate::{
    LoadBenchError,
    bench_meta::{StatValue, Statistic, Summary},
    bench_regression::compare,
    config::{HarnessConfig, StatsMode},
};

#[derive(Clone, Debug)]
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Times `operation` and prints the summary to stdout.
    pub fn run<F>(
        &self,
        name: &str,
        operation: F,
        baseline: Option<&Summary>,
    ) -> Result<Summary, LoadBenchError>
    where
        F: FnMut() -> Result<(), LoadBenchError>,
    {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with_output(&mut out, name, operation, baseline)
    }

    pub fn run_with_output<W, F>(
        &self,
        out: &mut W,
        name: &str,
        operation: F,
        baseline: Option<&Summary>,
    ) -> Result<Summary, LoadBenchError>
    where
        W: Write,
        F: FnMut() -> Result<(), LoadBenchError>,
    {
        if name.is_empty() {
            return Err(LoadBenchError::invalid_input("benchmark name is empty"));
        }
        self.config.validate()?;
        let samples = collect_samples(self.config.iterations, operation)?;
        let summary = summarize(name, samples, self.config.mode)?;
        info!(
            name,
            iterations = summary.iterations,
            mean_ms = summary.mean_ms(),
            "benchmark finished"
        );
        write_summary(out, &summary, baseline).map_err(LoadBenchError::Output)?;
        Ok(summary)
    }
}

/// Runs `operation` `iterations` times, returning elapsed milliseconds per run.
pub fn collect_samples<F>(
    iterations: usize,
    mut operation: F,
) -> Result<Vec<f64>, LoadBenchError>
where
    F: FnMut() -> Result<(), LoadBenchError>,
{
    if iterations == 0 {
        return Err(LoadBenchError::InvalidIterations(iterations));
    }
    let mut samples = Vec::with_capacity(iterations);
    for iteration in 0..iterations {
        let start = Instant::now();
        operation()?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(iteration, elapsed_ms, "sample recorded");
        samples.push(elapsed_ms);
    }
    Ok(samples)
}

/// Index of percentile `p` in a sorted sample set of `count` values.
///
/// `floor(count * p)`, clamped to the last valid index.
pub fn percentile_index(count: usize, p: f64) -> usize {
    if count == 0 {
        return 0;
    }
    let raw = (count as f64 * p).floor() as usize;
    raw.min(count - 1)
}

/// Reduces a sample set to the statistics of `mode`.
pub fn summarize(
    name: &str,
    mut samples: Vec<f64>,
    mode: StatsMode,
) -> Result<Summary, LoadBenchError> {
    if samples.is_empty() {
        return Err(LoadBenchError::InvalidIterations(0));
    }
    samples.sort_by(f64::total_cmp);
    let count = samples.len();
    let mean = samples.iter().sum::<f64>() / count as f64;
    let stats = Statistic::for_mode(mode)
        .iter()
        .map(|&statistic| {
            let ms = match statistic {
                Statistic::Average => mean,
                Statistic::Min => samples[0],
                Statistic::Max => samples[count - 1],
                other => {
                    let p = other.percentile().unwrap_or(1.0);
                    samples[percentile_index(count, p)]
                }
            };
            StatValue { statistic, ms }
        })
        .collect();
    Ok(Summary {
        name: name.to_string(),
        iterations: count,
        mode,
        stats,
    })
}

/// Writes `name:` followed by one indented line per statistic.
pub fn write_summary<W: Write>(
    out: &mut W,
    summary: &Summary,
    baseline: Option<&Summary>,
) -> io::Result<()> {
    writeln!(out, "{}:", summary.name)?;
    let comparison = baseline.map(|b| compare(summary, b));
    for value in &summary.stats {
        let annotation = comparison
            .as_ref()
            .and_then(|c| c.delta(value.statistic))
            .map(|delta| format!(" ({})", delta.annotation()))
            .unwrap_or_default();
        writeln!(
            out,
            "  {}: {:.3}ms{}",
            value.statistic.label(),
            value.ms,
            annotation
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_index_clamps_to_last_sample() {
        assert_eq!(percentile_index(5, 0.5), 2);
        assert_eq!(percentile_index(5, 0.95), 4);
        assert_eq!(percentile_index(1, 0.99), 0);
        assert_eq!(percentile_index(10, 1.0), 9);
    }

    #[test]
    fn test_summarize_sorts_before_reducing() {
        let summary = summarize("s", vec![5.0, 1.0, 4.0, 2.0, 3.0], StatsMode::MinMax).unwrap();
        assert_eq!(summary.get(Statistic::Min), Some(1.0));
        assert_eq!(summary.get(Statistic::Max), Some(5.0));
        assert_eq!(summary.iterations, 5);
    }

    #[test]
    fn test_summarize_rejects_empty_samples() {
        let err = summarize("s", Vec::new(), StatsMode::Percentiles).unwrap_err();
        assert!(matches!(err, LoadBenchError::InvalidIterations(0)));
    }
}
