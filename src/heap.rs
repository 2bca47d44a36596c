//! Heap profiling backed by `dhat`.
//!
//! The numbers are only real when the binary routes allocations through
//! dhat:
//!
//! ```rust,ignore
//! #[global_allocator]
//! static ALLOC: dhat::Alloc = dhat::Alloc;
//! ```
//!
//! dhat allows one running profiler per process.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::LoadBenchError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeapStats {
    /// Bytes currently allocated.
    pub heap_size: usize,
    /// Allocations not yet freed.
    pub object_count: usize,
    pub peak_heap_size: usize,
}

impl From<dhat::HeapStats> for HeapStats {
    fn from(stats: dhat::HeapStats) -> Self {
        Self {
            heap_size: stats.curr_bytes,
            object_count: stats.curr_blocks,
            peak_heap_size: stats.max_bytes,
        }
    }
}

pub struct HeapProfiler {
    profiler: dhat::Profiler,
    output: Option<PathBuf>,
}

impl HeapProfiler {
    /// Counts allocations without ever writing a profile.
    pub fn start() -> Self {
        Self {
            profiler: dhat::Profiler::builder().testing().build(),
            output: None,
        }
    }

    /// Records a full heap profile that [`finish`](Self::finish) writes to `path`.
    pub fn with_output<P: Into<PathBuf>>(path: P) -> Self {
        let output = path.into();
        let profiler = dhat::Profiler::builder().file_name(&output).build();
        Self {
            profiler,
            output: Some(output),
        }
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn stats(&self) -> HeapStats {
        dhat::HeapStats::get().into()
    }

    /// Stops profiling and returns the profile path once the file is on disk.
    pub fn finish(self) -> Result<Option<PathBuf>, LoadBenchError> {
        let Self { profiler, output } = self;
        drop(profiler);
        match output {
            Some(path) if path.is_file() => {
                debug!(path = %path.display(), "heap profile written");
                Ok(Some(path))
            }
            Some(path) => Err(LoadBenchError::snapshot(format!(
                "{} was not written",
                path.display()
            ))),
            None => Ok(None),
        }
    }
}
