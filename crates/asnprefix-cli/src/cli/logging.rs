//! Diagnostic logging setup.

use tracing_subscriber::EnvFilter;

/// Default filter: quiet except for the bulk table refreshes
const DEFAULT_FILTER: &str = "warn,asnprefix_client::cache=info";

/// Filter directive for the given `-v` count
pub fn filter_for(verbose: u8) -> &'static str {
    match verbose {
        0 => DEFAULT_FILTER,
        1 => "info",
        _ => "debug",
    }
}

/// Install the stderr subscriber; `RUST_LOG` takes precedence over `-v`.
pub fn init(verbose: u8, ansi: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_for(verbose)));

    // Ignore the error when a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(verbose > 1)
        .try_init();
}
