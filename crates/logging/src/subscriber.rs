//! crates/logging/src/subscriber.rs
//! Installs a `tracing-subscriber` fmt subscriber driven by [`LoggingConfig`].

use tracing_subscriber::EnvFilter;

use crate::LoggingError;
use crate::config::LoggingConfig;

/// Builds the `EnvFilter` equivalent of `config`.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(config.to_filter_directives())
        .map_err(|err| LoggingError::Filter(err.to_string()))
}

/// Installs the global subscriber, failing if one is already set.
pub fn try_init_tracing(config: LoggingConfig) -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config)?)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| LoggingError::AlreadyInstalled(err.to_string()))
}

/// Installs the global subscriber, ignoring an already-installed one.
///
/// # Usage
///
/// ```rust,ignore
/// use logging::{LoggingConfig, init_tracing};
///
/// init_tracing(LoggingConfig::from_verbose_level(2));
/// ```
pub fn init_tracing(config: LoggingConfig) {
    let _ = try_init_tracing(config);
}
