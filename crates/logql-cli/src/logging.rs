// Logging setup

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when neither `--log-level` nor `RUST_LOG` is set
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Pick the filter: explicit flag, then `RUST_LOG`, then the default
pub fn build_filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(level) => {
            EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
        }
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
    }
}

/// Install the global subscriber writing to stderr
///
/// Stdout stays reserved for command output.
pub fn init_logging(level: Option<&str>) {
    let _ = fmt()
        .with_env_filter(build_filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_level_wins() {
        assert_eq!(build_filter(Some("debug")).to_string(), "debug");
    }
}
