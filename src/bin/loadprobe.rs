use std::{env, io, process};

use chrono::Utc;
use loadbench::{
    LoadBenchError,
    cli::ProbeArgs,
    logging, platform,
    probe::{self, ProbeConfig, run_probe},
};

#[cfg(feature = "heap-stats")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

fn main() {
    logging::init();
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", ProbeArgs::help());
        return;
    }
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let parsed = match ProbeArgs::from_args(&arg_refs) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("{}", ProbeArgs::help());
            process::exit(1);
        }
    };

    let output_dir = match env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("error: cannot resolve working directory: {err}");
            process::exit(1);
        }
    };
    let config = ProbeConfig {
        version: parsed.version,
        path: parsed.path,
        heap_dump: parsed.heap_dump,
        output_dir,
    };

    let snapshot = config
        .heap_dump
        .then(|| probe::snapshot_path(&config, Utc::now()));
    let platform = platform::detect(snapshot);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = run_probe(&config, platform.as_ref(), &mut out) {
        let prefix = if matches!(err, LoadBenchError::Io { .. }) {
            "error"
        } else {
            "probe failed"
        };
        eprintln!("{prefix}: {err}");
        process::exit(1);
    }
}
