//! Formatter configuration
//!
//! `FormatterConfig` is built once by the host and handed to
//! [`EventFormatter::new`](crate::EventFormatter::new). Attribute names follow
//! the layout's external configuration surface: `charset`, `pretty`,
//! `json-stacktrace`, `max-stack-size` and `logger-pattern`.

use super::error::{LayoutError, Result};
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Cause-chain node cap used when none (or a non-positive one) is configured
pub const DEFAULT_MAX_CAUSE_DEPTH: usize = 20;

/// Output byte encoding
///
/// Only affects [`EventFormatter::to_bytes`](crate::EventFormatter::to_bytes).
/// Characters the charset cannot represent are replaced with `?`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Charset {
    #[default]
    Utf8,
    UsAscii,
    Iso8859_1,
}

impl Charset {
    /// Canonical charset name
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::UsAscii => "US-ASCII",
            Charset::Iso8859_1 => "ISO-8859-1",
        }
    }

    /// Encode text, borrowing when no conversion is needed
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        let limit = match self {
            Charset::Utf8 => return Cow::Borrowed(text.as_bytes()),
            Charset::UsAscii => 0x7F,
            Charset::Iso8859_1 => 0xFF,
        };
        if text.is_ascii() {
            return Cow::Borrowed(text.as_bytes());
        }
        Cow::Owned(
            text.chars()
                .map(|c| match u32::from(c) {
                    code if code <= limit => code as u8,
                    _ => b'?',
                })
                .collect(),
        )
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Charset {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "UTF-8" | "UTF8" => Ok(Charset::Utf8),
            "US-ASCII" | "ASCII" => Ok(Charset::UsAscii),
            "ISO-8859-1" | "ISO8859-1" | "ISO_8859_1" | "LATIN1" => Ok(Charset::Iso8859_1),
            _ => Err(LayoutError::charset(s)),
        }
    }
}

impl TryFrom<String> for Charset {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Charset> for String {
    fn from(charset: Charset) -> Self {
        charset.name().to_string()
    }
}

/// Configuration for the JSON layout
///
/// # Examples
///
/// ```
/// use json_event_layout::FormatterConfig;
///
/// let config = FormatterConfig::new()
///     .with_pretty(true)
///     .with_structured_stack_trace(true)
///     .with_max_cause_depth(5)
///     .with_logger_pattern("1.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FormatterConfig {
    /// Output byte encoding
    pub charset: Charset,
    /// Indent the JSON document
    pub pretty: bool,
    /// Emit the cause chain as an array instead of a text block
    #[serde(rename = "json-stacktrace")]
    pub structured_stack_trace: bool,
    /// Cause-chain node cap as supplied; see [`Self::effective_max_cause_depth`]
    #[serde(rename = "max-stack-size")]
    pub max_cause_depth: i64,
    /// Logger name abbreviation pattern
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logger_pattern: Option<String>,
    pub timestamp_format: TimestampFormat,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            charset: Charset::default(),
            pretty: false,
            structured_stack_trace: false,
            max_cause_depth: DEFAULT_MAX_CAUSE_DEPTH as i64,
            logger_pattern: None,
            timestamp_format: TimestampFormat::default(),
        }
    }
}

impl FormatterConfig {
    /// Create a new formatter configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from host-supplied attributes, keeping defaults for values
    /// that do not parse
    ///
    /// # Examples
    ///
    /// ```
    /// use json_event_layout::FormatterConfig;
    ///
    /// let config = FormatterConfig::from_attributes([
    ///     ("json-stacktrace", "true"),
    ///     ("max-stack-size", "not-a-number"),
    /// ]);
    /// assert!(config.structured_stack_trace);
    /// assert_eq!(config.effective_max_cause_depth(), 20);
    /// ```
    #[must_use]
    pub fn from_attributes<'a, I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        for (key, value) in attributes {
            if let Err(e) = config.apply_attribute(key, value, false) {
                eprintln!("[LAYOUT WARNING] {}. Keeping the default.", e);
            }
        }
        config
    }

    /// Build from host-supplied attributes, rejecting unknown keys and
    /// unparseable values
    pub fn from_attributes_strict<'a, I>(attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        for (key, value) in attributes {
            config.apply_attribute(key, value, true)?;
        }
        Ok(config)
    }

    fn apply_attribute(&mut self, key: &str, value: &str, strict: bool) -> Result<()> {
        match key {
            "charset" => self.charset = value.parse()?,
            "pretty" => self.pretty = parse_bool(key, value, strict)?,
            "json-stacktrace" => self.structured_stack_trace = parse_bool(key, value, strict)?,
            "max-stack-size" => {
                self.max_cause_depth = value
                    .trim()
                    .parse()
                    .map_err(|_| LayoutError::config(key, format!("'{}' is not an integer", value)))?
            }
            "logger-pattern" => self.logger_pattern = Some(value.to_string()),
            "timestamp-format" => {
                self.timestamp_format =
                    serde_json::from_value(serde_json::Value::String(value.trim().to_string()))
                        .map_err(|_| {
                            LayoutError::config(key, format!("unknown format '{}'", value))
                        })?
            }
            _ => return Err(LayoutError::config(key, "unknown attribute")),
        }
        Ok(())
    }

    /// Cap on visited cause-chain nodes, with non-positive values replaced
    /// by [`DEFAULT_MAX_CAUSE_DEPTH`]
    #[must_use]
    pub fn effective_max_cause_depth(&self) -> usize {
        if self.max_cause_depth > 0 {
            usize::try_from(self.max_cause_depth).unwrap_or(usize::MAX)
        } else {
            DEFAULT_MAX_CAUSE_DEPTH
        }
    }

    #[must_use]
    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub fn with_structured_stack_trace(mut self, structured: bool) -> Self {
        self.structured_stack_trace = structured;
        self
    }

    /// Set the cause-chain node cap; non-positive values mean the default
    #[must_use]
    pub fn with_max_cause_depth(mut self, depth: i64) -> Self {
        self.max_cause_depth = depth;
        self
    }

    #[must_use]
    pub fn with_logger_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.logger_pattern = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

// Lenient parsing treats anything but "true" as false
fn parse_bool(key: &str, value: &str, strict: bool) -> Result<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if !strict || value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(LayoutError::config(key, format!("'{}' is not a boolean", value)))
    }
}
