//! End-to-end scenarios for arithmetic coercion, arity and verb stubs.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use usertalk_ir::{Argument, BinaryOp, CodeTreeNode, FunctionNode, ParamNode};
use usertalk_values::{LangError, LangErrorKind, Value};

use super::build::*;
use crate::{evaluate, Interpreter, LocalScope, Scope};

#[test]
fn numeric_string_addition() {
    let scope = LocalScope::new(Scope::new());
    let sum = bin(BinaryOp::Add, int(1), text("2"));
    assert_eq!(evaluate(&sum, &scope).unwrap(), Value::int(3));
}

#[test]
fn non_numeric_string_addition_is_type_mismatch() {
    let scope = LocalScope::new(Scope::new());
    let node = CodeTreeNode::binary(BinaryOp::Add, int(1), text("a"), at(4));
    let err = evaluate(&node, &scope).unwrap_err();
    assert_eq!(
        err.kind(),
        &LangErrorKind::TypeMismatch {
            expected: "compatible operands for `+`".to_string(),
            found: "int and string".to_string()
        }
    );
    assert_eq!(err.position(), Some(at(4)));
}

#[test]
fn zero_parameter_function_returns_42() {
    let result = run(vec![
        def("f", vec![], vec![ret(int(42))]),
        call("f", vec![]),
    ]);
    assert_eq!(result.unwrap(), Value::int(42));
}

#[test]
fn extra_argument_is_count_mismatch() {
    let err = run(vec![
        def("f", vec![], vec![ret(int(42))]),
        call_at("f", vec![int(1)], at(30)),
    ])
    .unwrap_err();
    assert_eq!(
        err.kind(),
        &LangErrorKind::ArgumentCountMismatch {
            callee: "f".to_string(),
            min: 0,
            max: 0,
            got: 1
        }
    );
    assert_eq!(err.position(), Some(at(30)));
}

#[test]
fn too_few_arguments_never_enter_the_body() {
    let mut interpreter = Interpreter::new();
    let program = vec![
        assign("entered", boolean(false)),
        def(
            "g",
            vec![param("a"), param("b")],
            vec![assign("entered", boolean(true)), ret(var("a"))],
        ),
        call("g", vec![int(1)]),
    ];
    let err = interpreter.evaluate_statements(&program).unwrap_err();
    assert_eq!(err.kind().variant_name(), "ArgumentCountMismatch");
    assert_eq!(
        interpreter.evaluate(&var("entered")).unwrap(),
        Value::bool(false)
    );
    assert_eq!(interpreter.call_depth(), 0);
}

#[test]
fn getpicture_through_the_evaluator_is_verb_not_found() {
    let node = CodeTreeNode::verb_call("pict.getpicture", vec![], at(12));
    let err = Interpreter::new().evaluate(&node).unwrap_err();
    assert_eq!(
        err.kind(),
        &LangErrorKind::VerbNotFound {
            verb: "pict.getpicture".to_string(),
            recognized: true
        }
    );
    assert_eq!(err.position(), Some(at(12)));
}

#[test]
fn pict_stub_never_yields_a_value() {
    for verb in ["pict.scheduleUpdate", "pict.expression", "pict.setPicture"] {
        let node = CodeTreeNode::verb_call(
            verb,
            vec![Argument::positional(text("window"))],
            NO_POS,
        );
        let err = Interpreter::new().evaluate(&node).unwrap_err();
        assert_eq!(err.kind().variant_name(), "VerbNotFound", "{verb}");
    }
}

#[test]
fn evaluate_leaves_definitions_in_scope() {
    let scope = LocalScope::new(Scope::new());
    evaluate(&assign("total", int(5)), &scope).unwrap();
    let doubled = bin(BinaryOp::Mul, var("TOTAL"), int(2));
    assert_eq!(evaluate(&doubled, &scope).unwrap(), Value::int(10));
}

#[test]
fn duplicate_parameter_rejected_at_construction() {
    let params = vec![
        ParamNode::new("x", at(6)),
        ParamNode::new("X", at(9)),
    ];
    let err = FunctionNode::new(NO_POS, "h", params, block(vec![])).unwrap_err();
    let err = LangError::from(err);
    assert_eq!(
        err.kind(),
        &LangErrorKind::DuplicateParameter {
            function: "h".to_string(),
            name: "X".to_string()
        }
    );
    assert_eq!(err.position(), Some(at(9)));
}

#[test]
fn unregistered_namespace_is_verb_not_found() {
    let node = CodeTreeNode::verb_call("clock.ticks", vec![], at(2));
    let err = Interpreter::new().evaluate(&node).unwrap_err();
    assert_eq!(
        err.kind(),
        &LangErrorKind::VerbNotFound {
            verb: "clock.ticks".to_string(),
            recognized: false
        }
    );
    assert_eq!(err.position(), Some(at(2)));
}

#[test]
fn unknown_pict_verb_is_unrecognized() {
    let node = CodeTreeNode::verb_call("pict.zoom", vec![], NO_POS);
    let err = Interpreter::new().evaluate(&node).unwrap_err();
    assert!(matches!(
        err.kind(),
        LangErrorKind::VerbNotFound {
            recognized: false,
            ..
        }
    ));
}
