//! Timestamp rendering for the `@timestamp` field
//!
//! Events carry epoch milliseconds; this module turns them into the value
//! written to the document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use json_event_layout::TimestampFormat;
///
/// let value = TimestampFormat::Iso8601.render(1_700_000_000_000);
/// assert_eq!(value, "2023-11-14T22:13:20.000Z");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    ///
    /// Accepted as-is by Elasticsearch, Loki and most shippers.
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123000Z`
    Iso8601Micros,

    /// Unix timestamp in milliseconds, written as a JSON number: `1736332245123`
    UnixMillis,
}

impl TimestampFormat {
    /// Render a millisecond timestamp as a JSON value
    ///
    /// Timestamps chrono cannot represent fall back to the decimal count as
    /// a string, so the field is never dropped.
    #[must_use]
    pub fn render(&self, timestamp_millis: i64) -> serde_json::Value {
        match self {
            TimestampFormat::UnixMillis => serde_json::Value::Number(timestamp_millis.into()),
            _ => serde_json::Value::String(self.format_millis(timestamp_millis)),
        }
    }

    /// Format a millisecond timestamp as text
    #[must_use]
    pub fn format_millis(&self, timestamp_millis: i64) -> String {
        match DateTime::<Utc>::from_timestamp_millis(timestamp_millis) {
            Some(datetime) => self.format(&datetime),
            None => timestamp_millis.to_string(),
        }
    }

    /// Format a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
        }
    }
}
