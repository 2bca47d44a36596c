//! One-shot read and parse of a single document snapshot.

use std::{
    io::Write,
    path::{Path, PathBuf},
    time::Instant,
};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, warn};

use crate::{
    LoadBenchError,
    heap::HeapStats,
    library::LibraryVersion,
    platform::PlatformIo,
};

const MB: f64 = 1024.0 * 1024.0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeConfig {
    pub version: LibraryVersion,
    pub path: PathBuf,
    pub heap_dump: bool,
    /// Directory receiving heap snapshot files.
    pub output_dir: PathBuf,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProbeReport {
    pub version: LibraryVersion,
    pub file_size: u64,
    pub read_ms: f64,
    pub parse_ms: f64,
    pub heap: Option<HeapStats>,
    pub snapshot_path: Option<PathBuf>,
}

/// Reads, parses and reports on `config.path`, writing the report to `out`.
///
/// Read failures are returned before anything is parsed. The parsed document
/// stays alive until heap statistics have been sampled and, with
/// `heap_dump`, the platform's heap profile has been written.
pub fn run_probe<W: Write>(
    config: &ProbeConfig,
    platform: &dyn PlatformIo,
    out: &mut W,
) -> Result<ProbeReport, LoadBenchError> {
    debug!(
        platform = platform.name(),
        path = %config.path.display(),
        "probe starting"
    );
    let start_read = Instant::now();
    let file = platform.read_file(&config.path)?;
    let read_ms = elapsed_ms(start_read);

    report(
        out,
        format_args!(
            "File size: {} bytes ({:.2} MB)",
            file.size,
            file.size as f64 / MB
        ),
    )?;
    report(out, format_args!("File read time: {read_ms:.2} ms"))?;

    let start_parse = Instant::now();
    let document = config.version.load(&file.bytes)?;
    let parse_ms = elapsed_ms(start_parse);
    report(
        out,
        format_args!("\nAutomerge{} load time: {parse_ms:.2} ms", config.version),
    )?;

    let heap = platform.heap_stats();
    match heap {
        Some(stats) => {
            report(out, format_args!("\nHeap stats:"))?;
            report(
                out,
                format_args!("  Size: {:.2} MB", stats.heap_size as f64 / MB),
            )?;
            report(
                out,
                format_args!("  Objects: {}", group_thousands(stats.object_count as u64)),
            )?;
        }
        None => report(
            out,
            format_args!("\nHeap stats not available on this platform"),
        )?,
    }

    let mut snapshot_path = None;
    if config.heap_dump {
        match platform.finish_heap_profile()? {
            Some(path) => {
                report(
                    out,
                    format_args!("\nHeap snapshot saved to: {}", path.display()),
                )?;
                snapshot_path = Some(path);
            }
            None => {
                warn!(
                    platform = platform.name(),
                    "heap snapshot requested without heap tracking"
                );
                report(
                    out,
                    format_args!("\nHeap snapshot generation requires heap tracking"),
                )?;
            }
        }
    }
    drop(document);

    Ok(ProbeReport {
        version: config.version,
        file_size: file.size,
        read_ms,
        parse_ms,
        heap,
        snapshot_path,
    })
}

/// `heap-snapshot-<version>-<file name>-<timestamp>.json`, with `:` and `.`
/// in the ISO-8601 timestamp replaced by `-`.
pub fn snapshot_file_name(version: LibraryVersion, source: &Path, at: DateTime<Utc>) -> String {
    let file_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let timestamp = at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("heap-snapshot-{version}-{file_name}-{timestamp}.json")
}

/// Where a heap snapshot for `config` taken at `at` is written.
pub fn snapshot_path(config: &ProbeConfig, at: DateTime<Utc>) -> PathBuf {
    config
        .output_dir
        .join(snapshot_file_name(config.version, &config.path, at))
}

/// Formats `n` with `,` between groups of three digits.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn report<W: Write>(out: &mut W, line: std::fmt::Arguments<'_>) -> Result<(), LoadBenchError> {
    writeln!(out, "{line}").map_err(LoadBenchError::Output)
}
