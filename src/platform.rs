//! File access and heap diagnostics behind one capability interface.
//!
//! The platform is chosen once with [`detect`] and passed to whatever needs
//! it. [`TrackedPlatform`] owns the process heap profiler; [`BasicPlatform`]
//! only reads files.

use std::{
    cell::RefCell,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    LoadBenchError,
    heap::{HeapProfiler, HeapStats},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRead {
    pub size: u64,
    pub bytes: Vec<u8>,
}

pub trait PlatformIo {
    fn name(&self) -> &'static str;

    fn read_file(&self, path: &Path) -> Result<FileRead, LoadBenchError>;

    /// Current heap usage, if the platform can observe it.
    fn heap_stats(&self) -> Option<HeapStats>;

    /// Stops heap profiling and writes the heap profile. `Ok(None)` when the
    /// platform has no profile to write.
    fn finish_heap_profile(&self) -> Result<Option<PathBuf>, LoadBenchError>;
}

/// Reads a whole file, sized from its metadata.
pub fn read_file(path: &Path) -> Result<FileRead, LoadBenchError> {
    let mut file = File::open(path).map_err(|e| LoadBenchError::io(path, e))?;
    let size = file
        .metadata()
        .map_err(|e| LoadBenchError::io(path, e))?
        .len();
    let mut bytes = Vec::with_capacity(size as usize);
    file.read_to_end(&mut bytes)
        .map_err(|e| LoadBenchError::io(path, e))?;
    debug!(path = %path.display(), size, "file read");
    Ok(FileRead { size, bytes })
}

pub struct TrackedPlatform {
    profiler: RefCell<Option<HeapProfiler>>,
}

impl TrackedPlatform {
    /// Starts the heap profiler. With `snapshot` set, the full profile is
    /// written there by [`PlatformIo::finish_heap_profile`].
    pub fn start(snapshot: Option<PathBuf>) -> Self {
        let profiler = match snapshot {
            Some(path) => HeapProfiler::with_output(path),
            None => HeapProfiler::start(),
        };
        Self {
            profiler: RefCell::new(Some(profiler)),
        }
    }
}

impl PlatformIo for TrackedPlatform {
    fn name(&self) -> &'static str {
        "tracked"
    }

    fn read_file(&self, path: &Path) -> Result<FileRead, LoadBenchError> {
        read_file(path)
    }

    fn heap_stats(&self) -> Option<HeapStats> {
        self.profiler.borrow().as_ref().map(HeapProfiler::stats)
    }

    fn finish_heap_profile(&self) -> Result<Option<PathBuf>, LoadBenchError> {
        let Some(profiler) = self.profiler.borrow_mut().take() else {
            return Err(LoadBenchError::snapshot("heap profiler already finished"));
        };
        if profiler.output().is_none() {
            return Err(LoadBenchError::snapshot(
                "heap profiler was started without a snapshot path",
            ));
        }
        profiler.finish()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BasicPlatform;

impl PlatformIo for BasicPlatform {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn read_file(&self, path: &Path) -> Result<FileRead, LoadBenchError> {
        read_file(path)
    }

    fn heap_stats(&self) -> Option<HeapStats> {
        None
    }

    fn finish_heap_profile(&self) -> Result<Option<PathBuf>, LoadBenchError> {
        Ok(None)
    }
}

/// Picks the richest platform this build supports.
///
/// With the `heap-stats` feature the binary must also install
/// `dhat::Alloc` as its global allocator, or every heap figure reads zero.
pub fn detect(snapshot: Option<PathBuf>) -> Box<dyn PlatformIo> {
    if cfg!(feature = "heap-stats") {
        Box::new(TrackedPlatform::start(snapshot))
    } else {
        Box::new(BasicPlatform)
    }
}
