/// Logging setup: `tracing` events to stderr, level chosen by `-v` / `-d`.
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Map the `--verbose` and `--debug` counts to a level. `RUST_LOG` still
/// takes precedence when set.
#[must_use]
pub fn level_for(verbose: u8, debug: u8) -> LevelFilter {
    match (verbose, debug) {
        (_, d) if d > 1 => LevelFilter::TRACE,
        (_, 1) => LevelFilter::DEBUG,
        (v, _) if v > 0 => LevelFilter::INFO,
        _ => LevelFilter::WARN,
    }
}

/// Install the global subscriber.
pub fn init(verbose: u8, debug: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbose, debug).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug > 0)
        .init();
}
