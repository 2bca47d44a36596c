//! Load-time and heap benchmarks for Automerge document snapshots.
//!
//! Two Automerge releases are linked side by side (see [`library`]); the
//! [`harness`] times repeated loads and the [`probe`] reports on a single one.
//! Run Criterion benchmarks with `cargo bench` to inspect reports under `target/criterion`.

pub mod baseline;
pub mod bench_meta;
pub mod bench_regression;
pub mod bench_utils;
pub mod cli;
pub mod config;
pub mod errors;
pub mod harness;
pub mod heap;
pub mod library;
pub mod logging;
pub mod platform;
pub mod probe;

pub use crate::bench_meta::{StatValue, Statistic, Summary};
pub use crate::config::{HarnessConfig, StatsMode};
pub use crate::errors::LoadBenchError;
pub use crate::harness::Harness;
pub use crate::library::{Document, LibraryVersion};
pub use crate::platform::{BasicPlatform, PlatformIo, TrackedPlatform};
