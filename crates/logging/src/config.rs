//! crates/logging/src/config.rs
//! Per-domain logging configuration.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::ParseLoggingError;
use crate::levels::{LogDomain, LogLevel};

/// Environment variable consulted by [`LoggingConfig::from_env`].
pub const LOG_ENV_VAR: &str = "STREAMKIT_LOG";

/// Combined logging configuration: one [`LogLevel`] per [`LogDomain`].
///
/// The textual form is a comma-separated list of `domain=level` pairs. A bare
/// level (without `domain=`) applies to every domain, so `"on,codec=debug"`
/// enables all domains and turns the codec domain up to debug.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoggingConfig {
    levels: [LogLevel; 3],
}

impl LoggingConfig {
    /// Configuration with every domain switched off.
    #[must_use]
    pub const fn off() -> Self {
        Self {
            levels: [LogLevel::Off; 3],
        }
    }

    /// Configuration with every domain at `level`.
    #[must_use]
    pub const fn uniform(level: LogLevel) -> Self {
        Self {
            levels: [level; 3],
        }
    }

    /// Maps a `-v` style counter onto domain levels.
    ///
    /// `0` is silent, `1` enables every domain, `2` makes them verbose and
    /// anything higher enables per-call traces.
    #[must_use]
    pub const fn from_verbose_level(level: u8) -> Self {
        match level {
            0 => Self::off(),
            1 => Self::uniform(LogLevel::On),
            2 => Self::uniform(LogLevel::Verbose),
            _ => Self::uniform(LogLevel::Debug),
        }
    }

    /// Reads the configuration from [`LOG_ENV_VAR`].
    ///
    /// Returns [`LoggingConfig::off`] when the variable is unset.
    pub fn from_env() -> Result<Self, ParseLoggingError> {
        match env::var(LOG_ENV_VAR) {
            Ok(spec) => spec.parse(),
            Err(_) => Ok(Self::off()),
        }
    }

    /// Returns the level configured for `domain`.
    #[must_use]
    pub const fn level(&self, domain: LogDomain) -> LogLevel {
        self.levels[domain.index()]
    }

    /// Sets the level for a single domain.
    pub fn set_level(&mut self, domain: LogDomain, level: LogLevel) {
        self.levels[domain.index()] = level;
    }

    /// Builder-style variant of [`set_level`](Self::set_level).
    #[must_use]
    pub fn with_level(mut self, domain: LogDomain, level: LogLevel) -> Self {
        self.set_level(domain, level);
        self
    }

    /// Returns `true` when messages of `level` in `domain` would be shown.
    #[must_use]
    pub fn enabled(&self, domain: LogDomain, level: LogLevel) -> bool {
        level != LogLevel::Off && self.level(domain) >= level
    }

    /// Renders the configuration as `tracing-subscriber` `EnvFilter` directives.
    ///
    /// Targets outside the workspace stay at `warn`.
    #[must_use]
    pub fn to_filter_directives(&self) -> String {
        let mut directives = String::from("warn");
        for domain in LogDomain::ALL {
            directives.push(',');
            directives.push_str(domain.target());
            directives.push('=');
            directives.push_str(self.level(domain).directive());
        }
        directives
    }
}

impl FromStr for LoggingConfig {
    type Err = ParseLoggingError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut config = Self::off();
        for item in spec.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            match item.split_once('=') {
                Some((domain, level)) => {
                    config.set_level(domain.parse()?, level.parse()?);
                }
                None => {
                    let level = item.parse()?;
                    config.levels = [level; 3];
                }
            }
        }
        Ok(config)
    }
}

impl fmt::Display for LoggingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for domain in LogDomain::ALL {
            if !first {
                f.write_str(",")?;
            }
            first = false;
            write!(f, "{domain}={}", self.level(domain))?;
        }
        Ok(())
    }
}
