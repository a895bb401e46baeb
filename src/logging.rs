//! Logging setup.
//!
//! Events go through `tracing`; the subscriber writes via the stderr buffer
//! so that nothing reaches the terminal while the dashboard owns it.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::stderr_buffer::BufferedStderr;

/// Default level for this crate's events.
pub fn default_level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Initialize the logging system. `RUST_LOG` takes precedence over `verbose`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbose: bool) {
    let default_filter = format!("facility_dash={}", default_level(verbose));

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(|| BufferedStderr)
            .with_ansi(false)
            .with_target(false),
    );

    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(true), Level::DEBUG);
        assert_eq!(default_level(false), Level::WARN);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(false);
        init_logging(true);
    }
}
