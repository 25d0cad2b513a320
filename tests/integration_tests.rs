//! Integration tests for the JSON layout
//!
//! These tests verify:
//! - Document shape and key order
//! - Structured and text stack traces
//! - Cause-chain depth capping
//! - Logger name abbreviation through configuration
//! - Host attribute handling

use json_event_layout::prelude::*;
use serde_json::{json, Value};
use std::error::Error;
use std::fmt;

fn event() -> LogEvent {
    LogEvent::new(LogLevel::Info, "com.acme.Service", "started")
        .with_timestamp_millis(1_700_000_000_000)
        .with_thread_name("main")
}

fn chain(depth: usize) -> ThrownError {
    (1..depth)
        .rev()
        .fold(ThrownError::new(format!("com.acme.E{}", depth - 1)), |cause, i| {
            ThrownError::new(format!("com.acme.E{}", i - 1))
                .with_message(format!("level {}", i - 1))
                .with_cause(cause)
        })
}

fn parse(line: &str) -> Value {
    serde_json::from_str(line).expect("formatter output must be valid JSON")
}

#[test]
fn test_plain_event_document() {
    let formatter = EventFormatter::new(FormatterConfig::default());
    let line = formatter.format(&event());

    assert_eq!(
        line,
        "{\"@timestamp\":\"2023-11-14T22:13:20.000Z\",\"thread\":\"main\",\"level\":\"INFO\",\
         \"logger\":\"com.acme.Service\",\"message\":\"started\"}\n"
    );
    assert_eq!(line.matches('\n').count(), 1);
    assert!(!line.contains("stack-trace"));
}

#[test]
fn test_key_order_with_stack_trace() {
    let formatter = EventFormatter::new(FormatterConfig::new().with_structured_stack_trace(true));
    let line = formatter.format(&event().with_thrown(chain(2)));

    let positions: Vec<usize> = ["@timestamp", "thread", "level", "logger", "message", "stack-trace"]
        .iter()
        .map(|key| line.find(&format!("\"{}\":", key)).expect("key present"))
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn test_structured_chain_labels() {
    let formatter = EventFormatter::new(FormatterConfig::new().with_structured_stack_trace(true));
    let value = parse(&formatter.format(&event().with_thrown(chain(3))));

    assert_eq!(
        value["stack-trace"],
        json!([
            {"exception": "com.acme.E0", "message": "level 0"},
            {"caused by": "com.acme.E1", "message": "level 1"},
            {"caused by": "com.acme.E2"}
        ])
    );
}

#[test]
fn test_structured_chain_truncated_silently() {
    let formatter = EventFormatter::new(
        FormatterConfig::new()
            .with_structured_stack_trace(true)
            .with_max_cause_depth(4),
    );
    let value = parse(&formatter.format(&event().with_thrown(chain(30))));
    let stack = value["stack-trace"].as_array().unwrap();

    assert_eq!(stack.len(), 4);
    assert_eq!(stack[3]["caused by"], "com.acme.E3");
}

#[test]
fn test_default_cap_is_twenty() {
    let formatter = EventFormatter::new(
        FormatterConfig::new()
            .with_structured_stack_trace(true)
            .with_max_cause_depth(-3),
    );
    let value = parse(&formatter.format(&event().with_thrown(chain(25))));
    assert_eq!(value["stack-trace"].as_array().unwrap().len(), 20);
}

#[test]
fn test_text_trace_is_capped_too() {
    let formatter = EventFormatter::new(FormatterConfig::new().with_max_cause_depth(2));
    let value = parse(&formatter.format(&event().with_thrown(chain(5))));
    let text = value["stack-trace"].as_str().unwrap();

    assert_eq!(text, "com.acme.E0: level 0\nCaused by: com.acme.E1: level 1\n");
}

#[test]
fn test_zero_frame_error_has_no_frames_key() {
    let formatter = EventFormatter::new(FormatterConfig::new().with_structured_stack_trace(true));
    let line = formatter.format(&event().with_thrown(ThrownError::new("com.acme.Bare")));

    assert!(!line.contains("frames"));
    assert!(!line.contains("null"));
    assert_eq!(parse(&line)["stack-trace"], json!([{"exception": "com.acme.Bare"}]));
}

#[test]
fn test_special_characters_are_escaped() {
    let formatter = EventFormatter::new(FormatterConfig::new().with_structured_stack_trace(true));
    let mut event = event().with_thrown(
        ThrownError::new("com.acme.Parse").with_message("bad \"quote\"\n\tnext line"),
    );
    event.message = Some("line one\nline two \u{1}".to_string());

    let line = formatter.format(&event);
    assert_eq!(line.matches('\n').count(), 1);

    let value = parse(&line);
    assert_eq!(value["message"], "line one\nline two \u{1}");
    assert_eq!(value["stack-trace"][0]["message"], "bad \"quote\"\n\tnext line");
}

#[test]
fn test_logger_pattern_from_attributes() {
    let config = FormatterConfig::from_attributes([("logger-pattern", "1")]);
    let formatter = EventFormatter::new(config);
    assert_eq!(parse(&formatter.format(&event()))["logger"], "Service");

    let config = FormatterConfig::from_attributes([("logger-pattern", "")]);
    let formatter = EventFormatter::new(config);
    assert_eq!(parse(&formatter.format(&event()))["logger"], "com.acme.Service");
}

#[test]
fn test_host_attributes_end_to_end() {
    let config = FormatterConfig::from_attributes([
        ("charset", "UTF-8"),
        ("pretty", "true"),
        ("json-stacktrace", "true"),
        ("max-stack-size", "1"),
    ]);
    let formatter = EventFormatter::new(config);
    let line = formatter.format(&event().with_thrown(chain(3)));

    assert!(line.starts_with("{\n"));
    assert!(line.ends_with("}\n"));
    assert_eq!(parse(&line)["stack-trace"].as_array().unwrap().len(), 1);
}

#[derive(Debug)]
struct StorageError {
    source: std::io::Error,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not persist order")
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

#[test]
fn test_rust_error_chain() {
    let err = StorageError {
        source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
    };
    let formatter = EventFormatter::new(FormatterConfig::new().with_structured_stack_trace(true));
    let value = parse(&formatter.format(&event().with_thrown(ThrownError::from_error(&err))));
    let stack = value["stack-trace"].as_array().unwrap();

    assert!(stack[0]["exception"].as_str().unwrap().ends_with("StorageError"));
    assert_eq!(stack[0]["message"], "could not persist order");
    assert_eq!(stack[1]["caused by"], "std::io::Error");
    assert_eq!(stack[1]["message"], "disk full");
}

#[test]
fn test_rust_error_chain_names_bare_io_kind() {
    let err = StorageError {
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    };
    let formatter = EventFormatter::new(FormatterConfig::new().with_structured_stack_trace(true));
    let value = parse(&formatter.format(&event().with_thrown(ThrownError::from_error(&err))));

    assert_eq!(value["stack-trace"][1]["caused by"], "std::io::Error");
}

#[derive(Debug)]
struct Looping {
    frames: Vec<StackFrame>,
}

impl Throwable for Looping {
    fn type_name(&self) -> &str {
        "com.acme.Looping"
    }

    fn message(&self) -> Option<&str> {
        Some("round and round")
    }

    fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    fn cause(&self) -> Option<&dyn Throwable> {
        Some(self)
    }
}

#[test]
fn test_cyclic_host_error_terminates() {
    let looping = Looping {
        frames: vec![StackFrame::new("com.acme.Loop", "spin").with_location("Loop.java", 3)],
    };

    let structured = EventFormatter::new(
        FormatterConfig::new()
            .with_structured_stack_trace(true)
            .with_max_cause_depth(6),
    );
    let value = parse(&structured.format(&event().with_thrown(looping)));
    assert_eq!(value["stack-trace"].as_array().unwrap().len(), 6);

    let looping = Looping { frames: Vec::new() };
    let text = EventFormatter::new(FormatterConfig::new().with_max_cause_depth(3));
    let value = parse(&text.format(&event().with_thrown(looping)));
    assert_eq!(
        value["stack-trace"].as_str().unwrap().matches("Caused by:").count(),
        2
    );
}

#[test]
fn test_formatting_is_deterministic() {
    let formatter = EventFormatter::new(FormatterConfig::default());
    let event = event().with_thrown(chain(4));
    assert_eq!(formatter.format(&event), formatter.format(&event));
}
