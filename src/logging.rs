//! Tracing subscriber setup for the `td` CLI.
//!
//! Diagnostics go to stderr so stdout stays clean for command output and
//! `--json` consumers. Verbosity maps to levels: default warn, `-v` info,
//! `-vv` debug, `-vvv` trace; `--quiet` clamps to errors. An explicit
//! filter string or `RUST_LOG` overrides the mapping.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns an error string if a subscriber is already installed or the
/// filter directive fails to parse.
pub fn init_logging(verbose: u8, quiet: bool, filter: Option<&str>) -> Result<(), String> {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let env_filter = match filter {
        Some(directives) => EnvFilter::try_new(directives).map_err(|e| e.to_string())?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| e.to_string())
}

/// Install a permissive subscriber for tests; repeated calls are harmless.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_rejects_bad_filter() {
        assert!(init_logging(0, false, Some("not a [valid] directive")).is_err());
    }
}
