//! Logging setup for the `gb` binary.
//!
//! The library only emits `tracing` events; it never installs a subscriber.
//! The binary calls [`init_logging`] once, which writes human-readable lines
//! to stderr so they never mix with command output on stdout.
//!
//! Level precedence: `GB_LOG` (any `EnvFilter` directive, e.g.
//! `gb=debug`) wins over `-v` flags, which win over the default `warn`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "GB_LOG";

/// Default filter directive for a given `-v` count.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build the filter from `GB_LOG`, falling back to the verbosity level.
pub fn build_env_filter(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbose)))
}

/// Install the global stderr subscriber.
///
/// A second call is a no-op.
pub fn init_logging(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
