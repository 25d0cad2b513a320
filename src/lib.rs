//! # JSON Event Layout
//!
//! Formats structured log events as single-line (or pretty-printed) JSON
//! documents for log shippers and search indexes.
//!
//! ## Features
//!
//! - **Ordered Documents**: `@timestamp`, `thread`, `level`, `logger`, `message`, `stack-trace`
//! - **Bounded Cause Chains**: error chains rendered as text or as a JSON array, capped by depth
//! - **Logger Abbreviation**: `1.` turns `com.acme.billing.Invoice` into `c.a.b.Invoice`
//! - **Thread Safe**: one formatter serves any number of threads without locking

pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        CauseLabel, CauseNode, Charset, EventFormatter, FormatterConfig, LayoutError, LogEvent,
        LogLevel, LoggerNameAbbreviator, Result, StackFrame, StackTrace, Throwable, ThrownError,
        TimestampFormat, DEFAULT_MAX_CAUSE_DEPTH,
    };
}

pub use core::{
    CauseLabel, CauseNode, Charset, EventFormatter, FormatterConfig, LayoutError, LogEvent,
    LogLevel, LoggerNameAbbreviator, Result, StackFrame, StackTrace, Throwable, ThrownError,
    TimestampFormat, DEFAULT_MAX_CAUSE_DEPTH, MAX_CAPTURED_SOURCES, UNKNOWN_SOURCE_TYPE,
};
