//! Error chain nodes attached to log events
//!
//! Provides:
//! - `StackFrame`: one frame of an error's trace
//! - `Throwable`: the view the formatter needs of an error and its cause
//! - `ThrownError`: owned, immutable implementation of `Throwable`

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Upper bound on `source()` links followed by [`ThrownError::from_error`]
pub const MAX_CAPTURED_SOURCES: usize = 64;

/// Type name given to captured sources of an unrecognized type
pub const UNKNOWN_SOURCE_TYPE: &str = "std::error::Error";

/// A single stack frame
///
/// Displays as the frame descriptor used in trace output:
/// `app::db::Pool.acquire(pool.rs:42)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// Declaring module or class path
    pub module: String,
    /// Function or method name
    pub function: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl StackFrame {
    pub fn new(module: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            function: function.into(),
            file: None,
            line: None,
        }
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.module.is_empty() {
            write!(f, "{}", self.function)?;
        } else {
            write!(f, "{}.{}", self.module, self.function)?;
        }
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "({}:{})", file, line),
            (Some(file), None) => write!(f, "({})", file),
            (None, _) => write!(f, "(Unknown Source)"),
        }
    }
}

/// An error as seen by the formatter
///
/// Implementations may come from a host framework. The formatter never
/// assumes the cause chain is acyclic: an implementation that returns
/// itself (or an earlier node) from `cause` still formats, because the
/// walk is bounded by node count.
pub trait Throwable: fmt::Debug + Send + Sync {
    /// Fully qualified type name
    fn type_name(&self) -> &str;

    fn message(&self) -> Option<&str>;

    fn frames(&self) -> &[StackFrame];

    /// The error this one wraps, if any
    fn cause(&self) -> Option<&dyn Throwable>;
}

/// Owned error chain node
///
/// # Example
///
/// ```
/// use json_event_layout::{StackFrame, ThrownError};
///
/// let root = ThrownError::new("app::PoolError")
///     .with_message("pool exhausted")
///     .with_frame(StackFrame::new("app::db", "acquire").with_location("db.rs", 88))
///     .with_cause(ThrownError::new("std::io::Error").with_message("timed out"));
/// ```
#[derive(Clone)]
pub struct ThrownError {
    type_name: String,
    message: Option<String>,
    frames: Vec<StackFrame>,
    cause: Option<Arc<ThrownError>>,
}

impl ThrownError {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: None,
            frames: Vec::new(),
            cause: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_frame(mut self, frame: StackFrame) -> Self {
        self.frames.push(frame);
        self
    }

    #[must_use]
    pub fn with_frames(mut self, frames: impl IntoIterator<Item = StackFrame>) -> Self {
        self.frames.extend(frames);
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: ThrownError) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// Capture a Rust error and its `source()` chain
    ///
    /// The root keeps the static type name of `E`. Sources are only known
    /// as trait objects: well-known error types are recognized by downcast,
    /// anything else is named [`UNKNOWN_SOURCE_TYPE`]. Empty display strings
    /// become absent messages. At most [`MAX_CAPTURED_SOURCES`] sources are
    /// followed.
    pub fn from_error<E: StdError + 'static>(error: &E) -> Self {
        let mut sources = Vec::new();
        let mut source = error.source();
        while let Some(err) = source {
            if sources.len() >= MAX_CAPTURED_SOURCES {
                break;
            }
            sources.push((source_type_name(err).to_string(), non_empty(err.to_string())));
            source = err.source();
        }

        let cause = sources
            .into_iter()
            .rev()
            .fold(None, |cause, (type_name, message)| {
                Some(Arc::new(ThrownError {
                    type_name,
                    message,
                    frames: Vec::new(),
                    cause,
                }))
            });

        ThrownError {
            type_name: std::any::type_name::<E>().to_string(),
            message: non_empty(error.to_string()),
            frames: Vec::new(),
            cause,
        }
    }

    // This node followed by its causes
    fn chain(&self) -> impl Iterator<Item = &ThrownError> {
        std::iter::successors(Some(self), |node| node.cause.as_deref())
    }

    fn same_node(&self, other: &ThrownError) -> bool {
        self.type_name == other.type_name
            && self.message == other.message
            && self.frames == other.frames
    }
}

// Debug and PartialEq walk the chain iteratively; deep chains would overflow
// the stack with derived impls
impl fmt::Debug for ThrownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThrownError")
            .field("type_name", &self.type_name)
            .field("message", &self.message)
            .field("frames", &self.frames)
            .field("causes", &Causes(self))
            .finish()
    }
}

struct Causes<'a>(&'a ThrownError);

impl fmt::Debug for Causes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.chain().skip(1).map(Node)).finish()
    }
}

struct Node<'a>(&'a ThrownError);

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("type_name", &self.0.type_name)
            .field("message", &self.0.message)
            .field("frames", &self.0.frames)
            .finish()
    }
}

impl PartialEq for ThrownError {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.chain();
        let mut right = other.chain();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if std::ptr::eq(a, b) => return true,
                (Some(a), Some(b)) if a.same_node(b) => continue,
                _ => return false,
            }
        }
    }
}

impl Eq for ThrownError {}

// Unlink the chain iteratively so dropping a deep chain can't overflow the stack
impl Drop for ThrownError {
    fn drop(&mut self) {
        let mut cause = self.cause.take();
        while let Some(node) = cause {
            match Arc::try_unwrap(node) {
                Ok(mut inner) => cause = inner.cause.take(),
                Err(_) => break,
            }
        }
    }
}

impl Throwable for ThrownError {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    fn cause(&self) -> Option<&dyn Throwable> {
        self.cause.as_deref().map(|cause| cause as &dyn Throwable)
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

// Public paths of source types recognized by downcast
macro_rules! known_source_types {
    ($err:expr, { $($ty:ty => $name:literal),* $(,)? }) => {
        $(
            if $err.is::<$ty>() {
                return $name;
            }
        )*
    };
}

fn source_type_name(err: &(dyn StdError + 'static)) -> &'static str {
    known_source_types!(err, {
        std::io::Error => "std::io::Error",
        std::fmt::Error => "std::fmt::Error",
        std::num::ParseIntError => "std::num::ParseIntError",
        std::num::ParseFloatError => "std::num::ParseFloatError",
        std::num::TryFromIntError => "std::num::TryFromIntError",
        std::str::Utf8Error => "std::str::Utf8Error",
        std::str::ParseBoolError => "std::str::ParseBoolError",
        std::string::FromUtf8Error => "std::string::FromUtf8Error",
        std::char::ParseCharError => "std::char::ParseCharError",
        std::net::AddrParseError => "std::net::AddrParseError",
        std::env::VarError => "std::env::VarError",
        std::time::SystemTimeError => "std::time::SystemTimeError",
        std::sync::mpsc::RecvError => "std::sync::mpsc::RecvError",
        serde_json::Error => "serde_json::Error",
        chrono::ParseError => "chrono::ParseError",
        super::error::LayoutError => "json_event_layout::LayoutError",
    });
    UNKNOWN_SOURCE_TYPE
}
