use std::{env, path::PathBuf, process};

use loadbench::{
    BasicPlatform, Harness, LoadBenchError, PlatformIo, Summary,
    baseline::BaselineStore,
    bench_regression::{BenchGate, BenchGateConfig},
    cli::BenchArgs,
    library::LibraryVersion,
    logging,
};

const BASELINE_ENV: &str = "LOADBENCH_BASELINE";

fn main() {
    logging::init();
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", BenchArgs::help());
        return;
    }
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let default_baseline = env::var(BASELINE_ENV).ok().map(PathBuf::from);
    let config = match BenchArgs::from_args(&arg_refs, default_baseline) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("{}", BenchArgs::help());
            process::exit(1);
        }
    };

    // Heap profiling would distort the timings, so files are read untracked.
    match run(&config, &BasicPlatform) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}

struct Input {
    label: String,
    bytes: Vec<u8>,
}

/// Returns `false` when the regression gate fails.
fn run(config: &BenchArgs, platform: &dyn PlatformIo) -> Result<bool, LoadBenchError> {
    let inputs = config
        .files
        .iter()
        .map(|path| {
            let file = platform.read_file(path)?;
            Ok(Input {
                label: path.display().to_string(),
                bytes: file.bytes,
            })
        })
        .collect::<Result<Vec<_>, LoadBenchError>>()?;

    println!("\n=== Document Sizes ===");
    for input in &inputs {
        println!(
            "{}: {:.2} KB",
            input.label,
            input.bytes.len() as f64 / 1024.0
        );
    }

    let stored = match &config.baseline {
        Some(path) => BaselineStore::new(path).load()?,
        None => Vec::new(),
    };
    let harness = Harness::new(config.harness.clone());
    let mut summaries = Vec::new();
    for input in &inputs {
        println!("\n=== {} Load Performance ===", input.label);
        let mut previous: Option<Summary> = None;
        for &version in &config.versions {
            let name = run_name(version, &input.label);
            let baseline = stored
                .iter()
                .find(|s| s.name == name)
                .or(previous.as_ref());
            let summary = harness.run(
                &name,
                || version.load(&input.bytes).map(drop),
                baseline,
            )?;
            previous = Some(summary.clone());
            summaries.push(summary);
        }
    }

    if let Some(path) = &config.save_baseline {
        BaselineStore::new(path).record(&summaries)?;
        println!("\nBaseline saved to: {}", path.display());
    }

    let Some(tolerance) = config.tolerance else {
        return Ok(true);
    };
    if !summaries
        .iter()
        .any(|summary| stored.iter().any(|s| s.name == summary.name))
    {
        eprintln!("warning: no stored baseline matches these runs; nothing to gate");
    }
    let report = BenchGate::new(BenchGateConfig {
        baseline: stored,
        tolerance,
    })
    .evaluate(&summaries);
    for reason in &report.reasons {
        eprintln!("{reason}");
    }
    Ok(report.passed)
}

fn run_name(version: LibraryVersion, label: &str) -> String {
    format!("Automerge {version} Load ({label})")
}
