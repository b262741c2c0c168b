#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use usertalk_values::{host_error, LangErrorKind};

use super::*;

fn frame(name: &str, start: u32) -> CallFrame {
    CallFrame {
        name: Name::new(name),
        call_position: TextPosition::new(start, start + 1),
    }
}

#[test]
fn push_respects_limit() {
    let mut stack = CallStack::new(2);
    stack.push(frame("a", 0)).unwrap();
    stack.push(frame("b", 1)).unwrap();
    let err = stack.push(frame("c", 2)).unwrap_err();
    assert_eq!(
        err.kind(),
        &LangErrorKind::ResourceExhausted {
            resource: "recursion depth".to_string(),
            limit: 2
        }
    );
    assert_eq!(stack.depth(), 2);
    assert_eq!(stack.current_frame().unwrap().name.as_str(), "b");
}

#[test]
fn capture_is_most_recent_first() {
    let mut stack = CallStack::default();
    stack.push(frame("outer", 10)).unwrap();
    stack.push(frame("inner", 20)).unwrap();

    let trace = stack.capture();
    let names: Vec<_> = trace.frames().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["inner", "outer"]);
    assert_eq!(trace.frames()[0].position, Some(TextPosition::new(20, 21)));
}

#[test]
fn attach_backtrace_skips_empty_stack() {
    let stack = CallStack::default();
    assert!(stack.attach_backtrace(host_error("x")).backtrace().is_none());
}

#[test]
fn attach_backtrace_keeps_innermost_capture() {
    let mut stack = CallStack::default();
    stack.push(frame("outer", 0)).unwrap();
    stack.push(frame("inner", 5)).unwrap();
    let err = stack.attach_backtrace(host_error("boom"));
    stack.pop();
    let err = stack.attach_backtrace(err);
    assert_eq!(err.backtrace().unwrap().len(), 2);
}
