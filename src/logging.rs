//! Logging init: tracing events to stderr, results stay on stdout.

use tracing_subscriber::EnvFilter;

/// Filter used when RUST_LOG is unset, picked from the `-v` count.
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info,hstsprobe=info",
        _ => "info,hstsprobe=debug",
    }
}

/// Initialize logging to stderr. RUST_LOG overrides the verbosity flag.
pub fn init_logging(verbose: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
