//! Unary operator implementations for the evaluator.

use usertalk_ir::UnaryOp;
use usertalk_values::{integer_overflow, unary_type_mismatch, LangError, Number, Value};

/// Evaluate a unary operation on an evaluated operand.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> Result<Value, LangError> {
    match op {
        UnaryOp::Neg => match value.to_number() {
            Some(Number::Int(n)) => n
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("negation")),
            Some(Number::Float(f)) => Ok(Value::Float(-f)),
            None => Err(unary_type_mismatch(op, value.type_name())),
        },
        UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
    }
}
