//! Logging setup for the `leaflet` binary.
//!
//! Logs always go to stderr; stdout is reserved for JSON output.
//!
//! ## Log Levels
//! - `RUST_LOG=leaflet_core=trace` - Show ignored scan fields
//! - `-v` - debug (interpreted scans, unreadable expiry dates)
//! - `-vv` - trace
//! - Default: `info` (config file in use, stdin totals, dropped expiry values)

use tracing_subscriber::EnvFilter;

/// Default filter directive for a verbosity count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "info,leaflet_core=debug,leaflet_cli=debug",
        _ => "trace",
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` wins unless `-v` was given explicitly.
pub fn init_tracing(verbosity: u8) {
    let filter = if verbosity == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(0)))
    } else {
        EnvFilter::new(default_directive(verbosity))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_by_verbosity() {
        assert_eq!(default_directive(0), "info");
        assert!(default_directive(1).contains("leaflet_core=debug"));
        assert_eq!(default_directive(2), "trace");
        assert_eq!(default_directive(7), "trace");
    }

    #[test]
    fn test_directives_parse() {
        for verbosity in 0..3 {
            assert!(EnvFilter::try_new(default_directive(verbosity)).is_ok());
        }
    }
}
