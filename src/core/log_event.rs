//! Log event handed to the formatter by the host framework

use super::log_level::LogLevel;
use super::thrown::Throwable;
use chrono::Utc;
use std::cell::RefCell;
use std::sync::Arc;

// Thread-local cache so events created on the same thread don't re-query the name
thread_local! {
    static THREAD_NAME_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Get the cached name of the current thread, falling back to its id
fn current_thread_name() -> String {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                let thread = std::thread::current();
                thread
                    .name()
                    .map(String::from)
                    .unwrap_or_else(|| format!("{:?}", thread.id()))
            })
            .clone()
    })
}

/// A single, already interpolated log event
///
/// Fields are public so a host can map its own event type field by field.
/// `thread_name` and `message` are optional; absent values are left out of
/// the formatted document rather than written as `null`.
#[derive(Debug, Clone)]
pub struct LogEvent {
    /// Milliseconds since the Unix epoch, UTC
    pub timestamp_millis: i64,
    pub thread_name: Option<String>,
    pub level: LogLevel,
    /// Dotted hierarchical name, e.g. `com.acme.Service`
    pub logger_name: String,
    pub message: Option<String>,
    pub thrown: Option<Arc<dyn Throwable>>,
}

impl LogEvent {
    /// Create an event stamped with the current time and thread
    ///
    /// `level` accepts a [`LogLevel`] or any host label (`"NOTICE"`).
    pub fn new(
        level: impl Into<LogLevel>,
        logger_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp_millis: Utc::now().timestamp_millis(),
            thread_name: Some(current_thread_name()),
            level: level.into(),
            logger_name: logger_name.into(),
            message: Some(message.into()),
            thrown: None,
        }
    }

    #[must_use]
    pub fn with_timestamp_millis(mut self, timestamp_millis: i64) -> Self {
        self.timestamp_millis = timestamp_millis;
        self
    }

    #[must_use]
    pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = Some(thread_name.into());
        self
    }

    #[must_use]
    pub fn with_thrown<T: Throwable + 'static>(mut self, thrown: T) -> Self {
        self.thrown = Some(Arc::new(thrown));
        self
    }

    /// Attach an error already shared with other events
    #[must_use]
    pub fn with_shared_thrown(mut self, thrown: Arc<dyn Throwable>) -> Self {
        self.thrown = Some(thrown);
        self
    }
}
