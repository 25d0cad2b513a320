//! Log level definitions
//!
//! The standard levels cover most hosts. Frameworks with their own levels
//! (`NOTICE`, `AUDIT`, ...) carry them as [`LogLevel::Custom`], whose label is
//! written to the `level` field verbatim.

use super::error::LayoutError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum LogLevel {
    /// Matches every event
    All,
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
    /// Matches no event
    Off,
    /// Host-defined level, labelled as given
    Custom(Cow<'static, str>),
}

impl LogLevel {
    /// A host-defined level
    ///
    /// Labels that name a standard level resolve to it, so
    /// `LogLevel::custom("INFO") == LogLevel::Info`.
    pub fn custom(label: impl Into<Cow<'static, str>>) -> Self {
        let label = label.into();
        Self::standard(&label).unwrap_or(LogLevel::Custom(label))
    }

    /// Canonical label written to the `level` field
    pub fn to_str(&self) -> &str {
        match self {
            LogLevel::All => "ALL",
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
            LogLevel::Off => "OFF",
            LogLevel::Custom(label) => label.as_ref(),
        }
    }

    fn standard(label: &str) -> Option<Self> {
        match label.to_uppercase().as_str() {
            "ALL" => Some(LogLevel::All),
            "TRACE" => Some(LogLevel::Trace),
            "DEBUG" => Some(LogLevel::Debug),
            "INFO" => Some(LogLevel::Info),
            "WARN" | "WARNING" => Some(LogLevel::Warn),
            "ERROR" => Some(LogLevel::Error),
            "FATAL" => Some(LogLevel::Fatal),
            "OFF" => Some(LogLevel::Off),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Parses standard level names only; use [`LogLevel::custom`] for others
impl FromStr for LogLevel {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::standard(s).ok_or_else(|| LayoutError::InvalidLevel(s.to_string()))
    }
}

impl From<&'static str> for LogLevel {
    fn from(label: &'static str) -> Self {
        LogLevel::custom(label)
    }
}

impl From<String> for LogLevel {
    fn from(label: String) -> Self {
        LogLevel::custom(label)
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        if label.is_empty() {
            return Err(serde::de::Error::custom(LayoutError::InvalidLevel(label)));
        }
        Ok(LogLevel::custom(label))
    }
}
