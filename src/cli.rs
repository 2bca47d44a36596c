use std::path::PathBuf;

use crate::{
    LoadBenchError,
    config::{DEFAULT_ITERATIONS, HarnessConfig, StatsMode},
    library::LibraryVersion,
};

/// Arguments of `loadprobe <version> <filepath> [--heap]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeArgs {
    pub version: LibraryVersion,
    pub path: PathBuf,
    pub heap_dump: bool,
}

impl ProbeArgs {
    /// `args[0]` is the program name.
    pub fn from_args(args: &[&str]) -> Result<Self, LoadBenchError> {
        let mut positional = Vec::new();
        let mut heap_dump = false;
        for arg in args.iter().skip(1) {
            match *arg {
                "--heap" => heap_dump = true,
                other if other.starts_with("--") => {
                    return Err(LoadBenchError::arguments(format!("unknown flag {other}")));
                }
                other => positional.push(other),
            }
        }
        let [version, path] = positional[..] else {
            return Err(LoadBenchError::arguments(format!(
                "expected <version> <filepath>, got {} positional arguments",
                positional.len()
            )));
        };
        Ok(Self {
            version: version.parse()?,
            path: PathBuf::from(path),
            heap_dump,
        })
    }

    pub fn help() -> &'static str {
        "USAGE: loadprobe <version> <filepath> [--heap]\n  \
         version: 2 or 3 (for automerge2 or automerge3)\n  \
         filepath: path to the .tnd file to load\n  \
         --heap: write a heap snapshot (requires heap tracking)\n"
    }
}

/// Arguments of `loadbench [options] <file>...`.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchArgs {
    pub files: Vec<PathBuf>,
    pub harness: HarnessConfig,
    pub versions: Vec<LibraryVersion>,
    pub baseline: Option<PathBuf>,
    pub save_baseline: Option<PathBuf>,
    /// Allowed mean regression against the baseline, as a fraction.
    pub tolerance: Option<f64>,
}

impl BenchArgs {
    /// `args[0]` is the program name. `default_baseline` applies when no
    /// `--baseline` flag is given.
    pub fn from_args(
        args: &[&str],
        default_baseline: Option<PathBuf>,
    ) -> Result<Self, LoadBenchError> {
        let mut files = Vec::new();
        let mut iterations = DEFAULT_ITERATIONS;
        let mut mode = StatsMode::MinMax;
        let mut versions = LibraryVersion::ALL.to_vec();
        let mut baseline = default_baseline;
        let mut save_baseline = None;
        let mut tolerance = None;
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match *arg {
                "--iterations" | "-n" => {
                    let raw = value(&mut iter, arg)?;
                    iterations = raw.parse().map_err(|_| {
                        LoadBenchError::arguments(format!("invalid iteration count {raw}"))
                    })?;
                    if iterations == 0 {
                        return Err(LoadBenchError::InvalidIterations(0));
                    }
                }
                "--percentiles" => mode = StatsMode::Percentiles,
                "--versions" => {
                    versions = value(&mut iter, arg)?
                        .split(',')
                        .map(|v| v.trim().parse::<LibraryVersion>())
                        .collect::<Result<Vec<_>, _>>()?;
                }
                "--baseline" => baseline = Some(PathBuf::from(value(&mut iter, arg)?)),
                "--save-baseline" => {
                    save_baseline = Some(PathBuf::from(value(&mut iter, arg)?));
                }
                "--tolerance" => {
                    let raw = value(&mut iter, arg)?;
                    let pct: f64 = raw.parse().map_err(|_| {
                        LoadBenchError::arguments(format!("invalid tolerance {raw}"))
                    })?;
                    if !pct.is_finite() || pct < 0.0 {
                        return Err(LoadBenchError::arguments(format!(
                            "invalid tolerance {raw}"
                        )));
                    }
                    tolerance = Some(pct / 100.0);
                }
                other if other.starts_with('-') => {
                    return Err(LoadBenchError::arguments(format!("unknown flag {other}")));
                }
                other => files.push(PathBuf::from(other)),
            }
        }
        if files.is_empty() {
            return Err(LoadBenchError::arguments("at least one file is required"));
        }
        if let Some(dup) = files
            .iter()
            .enumerate()
            .find_map(|(idx, file)| files[..idx].contains(file).then_some(file))
        {
            return Err(LoadBenchError::arguments(format!(
                "{} is given more than once",
                dup.display()
            )));
        }
        if tolerance.is_some() && baseline.is_none() {
            return Err(LoadBenchError::arguments(
                "--tolerance requires --baseline (or LOADBENCH_BASELINE)",
            ));
        }
        Ok(Self {
            files,
            harness: HarnessConfig::new(iterations, mode),
            versions,
            baseline,
            save_baseline,
            tolerance,
        })
    }

    pub fn help() -> &'static str {
        "USAGE: loadbench [--iterations N] [--percentiles] [--versions 2,3]\n                 \
         [--baseline PATH] [--save-baseline PATH] [--tolerance PCT] <file>...\n"
    }
}

fn value<'a, 'b, I>(iter: &mut I, flag: &str) -> Result<&'b str, LoadBenchError>
where
    'b: 'a,
    I: Iterator<Item = &'a &'b str>,
{
    iter.next()
        .copied()
        .ok_or_else(|| LoadBenchError::arguments(format!("{flag} requires a value")))
}
