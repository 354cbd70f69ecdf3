//! crates/logging/src/levels.rs
//! Log domains and the per-domain verbosity levels.

use std::fmt;
use std::str::FromStr;


use crate::ParseLoggingError;

/// Subsystems that emit diagnostics under their own tracing target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LogDomain {
    /// Growable buffers and their attached input streams.
    Buffer,
    /// Incremental compressors and decompressors.
    Codec,
    /// Slices and the varint codec.
    Wire,
}

impl LogDomain {
    /// Every domain, in declaration order.
    pub const ALL: [Self; 3] = [Self::Buffer, Self::Codec, Self::Wire];

    /// Short lowercase name used in filter specifications.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Buffer => "buffer",
            Self::Codec => "codec",
            Self::Wire => "wire",
        }
    }

    /// Tracing target that events of this domain are emitted under.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Buffer => crate::BUFFER_TARGET,
            Self::Codec => crate::CODEC_TARGET,
            Self::Wire => crate::WIRE_TARGET,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Buffer => 0,
            Self::Codec => 1,
            Self::Wire => 2,
        }
    }
}

impl fmt::Display for LogDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogDomain {
    type Err = ParseLoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|domain| domain.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseLoggingError::UnknownDomain(trimmed.to_owned()))
    }
}

/// How much a domain logs.
///
/// `On` shows the domain's ordinary messages, `Verbose` adds detail and
/// `Debug` shows everything the domain emits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LogLevel {
    /// Nothing is logged.
    #[default]
    Off,
    /// Informational messages.
    On,
    /// Informational and debug messages.
    Verbose,
    /// Every event, including per-call traces.
    Debug,
}

impl LogLevel {
    /// Name accepted by [`FromStr`] and used when rendering filter directives.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
            Self::Verbose => "verbose",
            Self::Debug => "debug",
        }
    }

    pub(crate) const fn directive(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "info",
            Self::Verbose => "debug",
            Self::Debug => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = ParseLoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "no" | "false" | "0" => Ok(Self::Off),
            "on" | "yes" | "true" | "info" | "1" => Ok(Self::On),
            "verbose" | "2" => Ok(Self::Verbose),
            "debug" | "trace" | "3" => Ok(Self::Debug),
            other => Err(ParseLoggingError::UnknownLevel(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_names_round_trip_through_from_str() {
        for domain in LogDomain::ALL {
            assert_eq!(domain.name().parse::<LogDomain>().unwrap(), domain);
        }
        assert_eq!("BUFFER".parse::<LogDomain>().unwrap(), LogDomain::Buffer);
    }

    #[test]
    fn unknown_domain_is_rejected() {
        let err = "socket".parse::<LogDomain>().expect_err("unknown domain");
        assert_eq!(err, ParseLoggingError::UnknownDomain("socket".to_owned()));
    }

    #[test]
    fn levels_accept_user_default_spellings() {
        assert_eq!("YES".parse::<LogLevel>().unwrap(), LogLevel::On);
        assert_eq!("no".parse::<LogLevel>().unwrap(), LogLevel::Off);
        assert_eq!("verbose".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
        assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Debug);
    }

    #[test]
    fn levels_are_ordered_by_detail() {
        assert!(LogLevel::Off < LogLevel::On);
        assert!(LogLevel::On < LogLevel::Verbose);
        assert!(LogLevel::Verbose < LogLevel::Debug);
    }
}
