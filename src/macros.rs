//! Macros for building error chains at the call site.
//!
//! # Examples
//!
//! ```
//! use json_event_layout::{stack_frame, ThrownError};
//!
//! let error = ThrownError::new("app::ConfigError")
//!     .with_message("missing key 'port'")
//!     .with_frame(stack_frame!("load_config"));
//! ```

/// Build a [`StackFrame`](crate::StackFrame) for the current location.
///
/// The module path, file and line come from the call site; the function
/// name is supplied by the caller.
///
/// # Examples
///
/// ```
/// use json_event_layout::stack_frame;
///
/// let frame = stack_frame!("handle_request");
/// assert_eq!(frame.function, "handle_request");
/// assert_eq!(frame.module, module_path!());
/// assert!(frame.line.is_some());
/// ```
#[macro_export]
macro_rules! stack_frame {
    ($function:expr) => {
        $crate::StackFrame::new(module_path!(), $function).with_location(file!(), line!())
    };
}

/// Build a [`ThrownError`](crate::ThrownError) with a frame for the current
/// location and a formatted message.
///
/// # Examples
///
/// ```
/// use json_event_layout::{thrown, Throwable};
///
/// let error = thrown!("app::QuotaError", "read_quota", "limit {} exceeded", 10);
/// assert_eq!(error.message(), Some("limit 10 exceeded"));
/// assert_eq!(error.frames().len(), 1);
/// ```
#[macro_export]
macro_rules! thrown {
    ($type_name:expr, $function:expr, $($arg:tt)+) => {
        $crate::ThrownError::new($type_name)
            .with_message(format!($($arg)+))
            .with_frame($crate::stack_frame!($function))
    };
}
