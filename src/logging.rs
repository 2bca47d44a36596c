use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "LOADBENCH_LOG";

/// Installs a stderr fmt subscriber so stdout carries only the report.
///
/// Filter comes from `LOADBENCH_LOG`, defaulting to `warn`. Calling this more
/// than once is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
