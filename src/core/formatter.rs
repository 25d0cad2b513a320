//! JSON event formatter
//!
//! Turns one [`LogEvent`] into one newline-terminated JSON document:
//!
//! ```text
//! {"@timestamp":"2023-11-14T22:13:20.000Z","thread":"main","level":"INFO","logger":"com.acme.Service","message":"started"}
//! ```
//!
//! A `stack-trace` field follows `message` when the event carries an error.

use super::abbreviator::LoggerNameAbbreviator;
use super::cause_chain::StackTrace;
use super::config::FormatterConfig;
use super::error::Result;
use super::log_event::LogEvent;
use serde::Serialize;
use std::borrow::Cow;

/// Document written for each event, in output key order
#[derive(Debug, Serialize)]
struct OutputDocument<'a> {
    #[serde(rename = "@timestamp")]
    timestamp: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread: Option<&'a str>,
    level: &'a str,
    logger: Cow<'a, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(rename = "stack-trace", skip_serializing_if = "Option::is_none")]
    stack_trace: Option<StackTrace<'a>>,
}

/// Stateless JSON layout
///
/// Holds only the normalized configuration and the compiled abbreviation
/// rule, so one instance can be shared by any number of threads.
///
/// # Example
///
/// ```
/// use json_event_layout::{EventFormatter, FormatterConfig, LogEvent, LogLevel};
///
/// let formatter = EventFormatter::new(FormatterConfig::default());
/// let event = LogEvent::new(LogLevel::Info, "com.acme.Service", "started")
///     .with_timestamp_millis(1_700_000_000_000)
///     .with_thread_name("main");
///
/// assert_eq!(
///     formatter.format(&event),
///     "{\"@timestamp\":\"2023-11-14T22:13:20.000Z\",\"thread\":\"main\",\
///      \"level\":\"INFO\",\"logger\":\"com.acme.Service\",\"message\":\"started\"}\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct EventFormatter {
    config: FormatterConfig,
    max_cause_depth: usize,
    abbreviator: Option<LoggerNameAbbreviator>,
}

impl EventFormatter {
    /// Create a formatter, normalizing the cap and compiling the logger pattern
    pub fn new(config: FormatterConfig) -> Self {
        let max_cause_depth = config.effective_max_cause_depth();
        let abbreviator = LoggerNameAbbreviator::from_pattern(config.logger_pattern.as_deref());
        Self {
            config,
            max_cause_depth,
            abbreviator,
        }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Cause-chain node cap in effect
    pub fn max_cause_depth(&self) -> usize {
        self.max_cause_depth
    }

    /// Apply the configured abbreviation, if any, to a logger name
    pub fn abbreviate_logger<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match &self.abbreviator {
            Some(abbreviator) => abbreviator.abbreviate(name),
            None => Cow::Borrowed(name),
        }
    }

    /// Format an event as one JSON line
    ///
    /// Never fails: if serialization goes wrong, a reduced document naming
    /// the problem is returned instead and the failure reported on stderr.
    pub fn format(&self, event: &LogEvent) -> String {
        match self.try_format(event) {
            Ok(line) => line,
            Err(e) => {
                eprintln!(
                    "[LAYOUT ERROR] Failed to format event from '{}': {}",
                    event.logger_name, e
                );
                let mut line = serde_json::json!({
                    "level": event.level.to_str(),
                    "logger": event.logger_name,
                    "layout-error": e.to_string(),
                })
                .to_string();
                line.push('\n');
                line
            }
        }
    }

    /// Format an event, surfacing serialization errors
    pub fn try_format(&self, event: &LogEvent) -> Result<String> {
        let document = self.document(event);
        let mut line = if self.config.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        line.push('\n');
        Ok(line)
    }

    /// Format an event and encode it with the configured charset
    pub fn to_bytes(&self, event: &LogEvent) -> Vec<u8> {
        self.config.charset.encode(&self.format(event)).into_owned()
    }

    /// The event's document as a JSON value, for embedding in larger payloads
    pub fn to_value(&self, event: &LogEvent) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.document(event))?)
    }

    fn document<'a>(&self, event: &'a LogEvent) -> OutputDocument<'a> {
        OutputDocument {
            timestamp: self.config.timestamp_format.render(event.timestamp_millis),
            thread: event.thread_name.as_deref(),
            level: event.level.to_str(),
            logger: self.abbreviate_logger(&event.logger_name),
            message: event.message.as_deref(),
            stack_trace: event.thrown.as_deref().map(|thrown| {
                StackTrace::build(
                    thrown,
                    self.max_cause_depth,
                    self.config.structured_stack_trace,
                )
            }),
        }
    }
}
