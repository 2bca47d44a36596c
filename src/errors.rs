use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadBenchError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Version must be 2 or 3 (got {0:?})")]
    InvalidVersion(String),
    #[error("invalid iteration count: {0}")]
    InvalidIterations(usize),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write report: {0}")]
    Output(#[source] io::Error),
    #[error("automerge{version} failed to load document: {message}")]
    Parse { version: u8, message: String },
    #[error("baseline error: {0}")]
    Baseline(String),
    #[error("heap snapshot error: {0}")]
    Snapshot(String),
}

impl LoadBenchError {
    pub fn arguments<T: Into<String>>(msg: T) -> Self {
        LoadBenchError::InvalidArguments(msg.into())
    }

    pub fn version<T: Into<String>>(raw: T) -> Self {
        LoadBenchError::InvalidVersion(raw.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        LoadBenchError::InvalidInput(msg.into())
    }

    pub fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        LoadBenchError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse<T: Into<String>>(version: u8, msg: T) -> Self {
        LoadBenchError::Parse {
            version,
            message: msg.into(),
        }
    }

    pub fn baseline<T: Into<String>>(msg: T) -> Self {
        LoadBenchError::Baseline(msg.into())
    }

    pub fn snapshot<T: Into<String>>(msg: T) -> Self {
        LoadBenchError::Snapshot(msg.into())
    }

    /// Argument problems are reported with usage text.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            LoadBenchError::InvalidArguments(_)
                | LoadBenchError::InvalidVersion(_)
                | LoadBenchError::InvalidIterations(_)
        )
    }
}
