//! Verb dispatch from the evaluator through a shared registry.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use usertalk_ir::{Argument, BinaryOp, CodeTreeNode};
use usertalk_values::{host_error, verb_not_found, LangError, LangErrorKind, Value};
use usertalk_verbs::{SharedVerbRegistry, VerbAppDelegate, VerbParams, VerbRegistry, VerbTable};

use super::build::*;
use crate::Interpreter;

/// `math.add`, `math.greet` and `math.host`, counting invocations.
#[derive(Default)]
struct MathVerbs {
    calls: AtomicUsize,
}

impl VerbTable for MathVerbs {
    fn namespace(&self) -> &str {
        "math"
    }

    fn verbs(&self) -> &[&str] {
        &["add", "greet", "host", "fail"]
    }

    fn evaluate(
        &self,
        verb: &str,
        params: VerbParams,
        delegate: &dyn VerbAppDelegate,
    ) -> Result<Value, LangError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        match verb {
            "add" => {
                params.expect_count(2, 2)?;
                Ok(Value::int(params.int(0)? + params.int(1)?))
            }
            "greet" => {
                let name = params.require_named("name")?;
                Ok(Value::string(format!("hi {}", name.display_value())))
            }
            "host" => {
                let stamp = delegate
                    .as_any()
                    .downcast_ref::<StampDelegate>()
                    .map_or(0, |d| d.stamp);
                Ok(Value::string(format!("{}#{stamp}", delegate.host_name())))
            }
            "fail" => Err(host_error("disk on fire")),
            _ => Err(verb_not_found(&format!("math.{verb}"))),
        }
    }
}

struct StampDelegate {
    stamp: i64,
}

impl VerbAppDelegate for StampDelegate {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn host_name(&self) -> &str {
        "frontier"
    }
}

fn with_math() -> (Interpreter, Arc<MathVerbs>) {
    let table = Arc::new(MathVerbs::default());
    let registry = SharedVerbRegistry::new(VerbRegistry::with_builtin_tables());
    registry.register(Arc::clone(&table) as Arc<dyn VerbTable>);
    let interpreter = Interpreter::builder().registry(registry).build();
    (interpreter, table)
}

fn verb(name: &str, args: Vec<Argument>) -> CodeTreeNode {
    CodeTreeNode::verb_call(name, args, NO_POS)
}

#[test]
fn positional_arguments_reach_the_table() {
    let (mut interpreter, table) = with_math();
    let node = verb(
        "Math.Add",
        vec![
            Argument::positional(int(40)),
            Argument::positional(text("2")),
        ],
    );
    assert_eq!(interpreter.evaluate(&node).unwrap(), Value::int(42));
    assert_eq!(table.calls.load(Ordering::Relaxed), 1);
}

#[test]
fn named_arguments_reach_the_table() {
    let (mut interpreter, _) = with_math();
    let node = verb("math.greet", vec![Argument::named("Name", text("ada"))]);
    assert_eq!(interpreter.evaluate(&node).unwrap(), Value::string("hi ada"));
}

#[test]
fn verb_arguments_are_evaluated_first() {
    let (mut interpreter, _) = with_math();
    let program = vec![
        assign("x", int(5)),
        verb(
            "math.add",
            vec![
                Argument::positional(bin(BinaryOp::Mul, var("x"), int(2))),
                Argument::positional(int(1)),
            ],
        ),
    ];
    assert_eq!(
        interpreter.evaluate_statements(&program).unwrap(),
        Value::int(11)
    );
}

#[test]
fn argument_errors_skip_dispatch() {
    let (mut interpreter, table) = with_math();
    let node = verb(
        "math.add",
        vec![
            Argument::positional(var("undefined")),
            Argument::positional(int(1)),
        ],
    );
    assert_eq!(
        interpreter.evaluate(&node).unwrap_err().kind().variant_name(),
        "UndefinedIdentifier"
    );
    assert_eq!(table.calls.load(Ordering::Relaxed), 0);
}

#[test]
fn table_errors_get_the_call_position() {
    let (mut interpreter, _) = with_math();
    let node = CodeTreeNode::verb_call(
        "math.add",
        vec![Argument::positional(int(1))],
        at(33),
    );
    let err = interpreter.evaluate(&node).unwrap_err();
    assert_eq!(err.kind().variant_name(), "ArgumentCountMismatch");
    assert_eq!(err.position(), Some(at(33)));

    let node = CodeTreeNode::verb_call("math.fail", vec![], at(7));
    let err = interpreter.evaluate(&node).unwrap_err();
    assert_eq!(
        err.kind(),
        &LangErrorKind::Host {
            message: "disk on fire".to_string()
        }
    );
    assert_eq!(err.position(), Some(at(7)));
}

#[test]
fn delegate_is_passed_through() {
    let registry = SharedVerbRegistry::new(VerbRegistry::new());
    registry.register(Arc::new(MathVerbs::default()));
    let mut interpreter = Interpreter::builder()
        .registry(registry)
        .delegate(Arc::new(StampDelegate { stamp: 7 }))
        .build();
    let node = verb("math.host", vec![]);
    assert_eq!(
        interpreter.evaluate(&node).unwrap(),
        Value::string("frontier#7")
    );
}

#[test]
fn default_delegate_is_the_null_host() {
    let (mut interpreter, _) = with_math();
    assert_eq!(
        interpreter.evaluate(&verb("math.host", vec![])).unwrap(),
        Value::string("usertalk#0")
    );
}

#[test]
fn registry_is_shared_between_interpreters() {
    let registry = SharedVerbRegistry::new(VerbRegistry::new());
    let mut first = Interpreter::builder().registry(registry.clone()).build();
    let mut second = Interpreter::builder().registry(registry.clone()).build();

    let node = verb(
        "math.add",
        vec![Argument::positional(int(1)), Argument::positional(int(1))],
    );
    assert_eq!(first.evaluate(&node).unwrap_err().kind().variant_name(), "VerbNotFound");

    registry.register(Arc::new(MathVerbs::default()));
    assert_eq!(second.evaluate(&node).unwrap(), Value::int(2));
    assert_eq!(first.evaluate(&node).unwrap(), Value::int(2));
}

#[test]
fn unqualified_call_without_function_is_verb_not_found() {
    let err = run(vec![call_at("frobnicate", vec![], at(1))]).unwrap_err();
    assert_eq!(
        err.kind(),
        &LangErrorKind::VerbNotFound {
            verb: "frobnicate".to_string(),
            recognized: false
        }
    );
    assert_eq!(err.position(), Some(at(1)));
}

#[test]
fn verb_calls_from_inside_functions() {
    let (mut interpreter, table) = with_math();
    let program = vec![
        def(
            "sum3",
            vec![param("a"), param("b"), param("c")],
            vec![ret(verb(
                "math.add",
                vec![
                    Argument::positional(var("a")),
                    Argument::positional(verb(
                        "math.add",
                        vec![
                            Argument::positional(var("b")),
                            Argument::positional(var("c")),
                        ],
                    )),
                ],
            ))],
        ),
        call("sum3", vec![int(1), int(2), int(3)]),
    ];
    assert_eq!(
        interpreter.evaluate_statements(&program).unwrap(),
        Value::int(6)
    );
    assert_eq!(table.calls.load(Ordering::Relaxed), 2);
}
