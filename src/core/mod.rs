//! Core layout types

pub mod abbreviator;
pub mod cause_chain;
pub mod config;
pub mod error;
pub mod formatter;
pub mod log_event;
pub mod log_level;
pub mod thrown;
pub mod timestamp;

pub use abbreviator::LoggerNameAbbreviator;
pub use cause_chain::{CauseLabel, CauseNode, StackTrace};
pub use config::{Charset, FormatterConfig, DEFAULT_MAX_CAUSE_DEPTH};
pub use error::{LayoutError, Result};
pub use formatter::EventFormatter;
pub use log_event::LogEvent;
pub use log_level::LogLevel;
pub use thrown::{StackFrame, Throwable, ThrownError, MAX_CAPTURED_SOURCES, UNKNOWN_SOURCE_TYPE};
pub use timestamp::TimestampFormat;
