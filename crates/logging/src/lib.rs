#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` gives every streamkit subsystem its own log domain. Library
//! crates emit diagnostics through the [`trace_buffer!`], [`debug_codec!`] and
//! related macros, which are thin wrappers around `tracing` events with a
//! fixed target per domain. Nothing in the library crates installs a
//! subscriber; applications decide what is shown.
//!
//! # Design
//!
//! A [`LoggingConfig`] holds one [`LogLevel`] per [`LogDomain`]. It can be
//! built from a `-v` counter, parsed from a `domain=level` list, or read from
//! the `STREAMKIT_LOG` environment variable. With the `subscriber` feature the
//! configuration is rendered into `EnvFilter` directives and installed as a
//! fmt subscriber writing to stderr.
//!
//! # Examples
//!
//! ```
//! use logging::{LogDomain, LogLevel, LoggingConfig};
//!
//! let config: LoggingConfig = "on,codec=debug".parse().unwrap();
//! assert!(config.enabled(LogDomain::Codec, LogLevel::Debug));
//! assert!(!config.enabled(LogDomain::Buffer, LogLevel::Verbose));
//! ```

mod config;
mod levels;
#[cfg(feature = "subscriber")]
mod subscriber;
mod tracing_macros;

pub use config::{LOG_ENV_VAR, LoggingConfig};
pub use levels::{LogDomain, LogLevel};
#[cfg(feature = "subscriber")]
pub use subscriber::{env_filter, init_tracing, try_init_tracing};

/// Tracing target for buffer events.
pub const BUFFER_TARGET: &str = "streamkit::buffer";
/// Tracing target for codec events.
pub const CODEC_TARGET: &str = "streamkit::codec";
/// Tracing target for slice and varint events.
pub const WIRE_TARGET: &str = "streamkit::wire";

/// Error returned when a logging specification cannot be parsed.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseLoggingError {
    /// The domain name is not one of [`LogDomain::ALL`].
    #[error("unknown log domain '{0}'")]
    UnknownDomain(String),
    /// The level is not one of `off`, `on`, `verbose`, `debug`.
    #[error("unknown log level '{0}'")]
    UnknownLevel(String),
}

/// Error returned when installing the global subscriber fails.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LoggingError {
    /// The rendered filter directives were rejected.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// A global subscriber was already installed.
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(String),
}
