use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{LoadBenchError, bench_meta::Summary};

/// JSON file of previously recorded summaries, keyed by run name.
#[derive(Clone, Debug)]
pub struct BaselineStore {
    path: PathBuf,
}

impl BaselineStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored summaries; a missing or empty file holds none.
    pub fn load(&self) -> Result<Vec<Summary>, LoadBenchError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read(&self.path).map_err(|e| LoadBenchError::io(&self.path, e))?;
        if data.is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&data).map_err(|e| {
            LoadBenchError::baseline(format!("{}: {e}", self.path.display()))
        })
    }

    pub fn find(&self, name: &str) -> Result<Option<Summary>, LoadBenchError> {
        Ok(self.load()?.into_iter().find(|s| s.name == name))
    }

    /// Replaces stored summaries that share a name with `summaries`.
    pub fn record(&self, summaries: &[Summary]) -> Result<(), LoadBenchError> {
        let mut runs = self.load()?;
        runs.retain(|stored| !summaries.iter().any(|s| s.name == stored.name));
        runs.extend(summaries.iter().cloned());
        runs.sort_by(|a, b| a.name.cmp(&b.name));
        let data = serde_json::to_vec_pretty(&runs)
            .map_err(|e| LoadBenchError::baseline(e.to_string()))?;
        fs::write(&self.path, data).map_err(|e| LoadBenchError::io(&self.path, e))?;
        debug!(path = %self.path.display(), count = runs.len(), "baseline recorded");
        Ok(())
    }
}
