//! Binary operator implementations for the evaluator.
//!
//! The operator set is closed, so dispatch is a direct match on the operator
//! and the operand variants. Integer arithmetic is checked; numeric strings
//! are coerced by arithmetic operators only.

use std::cmp::Ordering;
use std::mem::discriminant;

use usertalk_ir::BinaryOp;
use usertalk_values::{
    binary_type_mismatch, division_by_zero, integer_overflow, Heap, LangError, Number, Value,
};

/// Checked arithmetic operation with overflow handling.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> Result<Value, LangError> {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

/// Checked division or remainder with zero guard.
#[inline]
fn checked_div<F>(is_zero: bool, op: F, op_name: &'static str) -> Result<Value, LangError>
where
    F: FnOnce() -> Option<i64>,
{
    if is_zero {
        Err(division_by_zero())
    } else {
        checked_arith(op(), op_name)
    }
}

/// Evaluate a binary operation whose operands are already evaluated.
///
/// `and`/`or` land here only when the evaluator has already decided both
/// operands are needed; short-circuiting happens in the evaluator.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> Result<Value, LangError> {
    match op {
        BinaryOp::Add => eval_add(left, right),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            eval_numeric(&left, &right, op)
        }
        BinaryOp::Eq => values_equal(&left, &right, op).map(Value::Bool),
        BinaryOp::NotEq => values_equal(&left, &right, op).map(|eq| Value::Bool(!eq)),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            eval_ordering(&left, &right, op)
        }
        BinaryOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
    }
}

/// `+`: concatenation for string and list pairs, numeric addition otherwise.
fn eval_add(left: Value, right: Value) -> Result<Value, LangError> {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(&a);
            joined.push_str(&b);
            Ok(Value::string(joined))
        }
        (Value::List(mut a), Value::List(b)) => {
            Heap::make_mut(&mut a).extend(b.iter().cloned());
            Ok(Value::List(a))
        }
        (left, right) => eval_numeric(&left, &right, BinaryOp::Add),
    }
}

fn eval_numeric(left: &Value, right: &Value, op: BinaryOp) -> Result<Value, LangError> {
    let (Some(a), Some(b)) = (left.to_number(), right.to_number()) else {
        return Err(binary_type_mismatch(op, left.type_name(), right.type_name()));
    };
    match (a, b) {
        (Number::Int(a), Number::Int(b)) => eval_int_binary(a, b, op),
        (a, b) => eval_float_binary(a.as_f64(), b.as_f64(), op),
    }
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> Result<Value, LangError> {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => checked_div(b == 0, || a.checked_div(b), "division"),
        BinaryOp::Mod => checked_div(b == 0, || a.checked_rem(b), "remainder"),
        _ => Err(binary_type_mismatch(op, "int", "int")),
    }
}

fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> Result<Value, LangError> {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div | BinaryOp::Mod if b == 0.0 => Err(division_by_zero()),
        BinaryOp::Div => Ok(Value::Float(a / b)),
        BinaryOp::Mod => Ok(Value::Float(a % b)),
        _ => Err(binary_type_mismatch(op, "float", "float")),
    }
}

/// Numeric view for comparisons. Strings stay strings here.
fn comparable_number(value: &Value) -> Option<Number> {
    match value {
        Value::Int(n) => Some(Number::Int(*n)),
        Value::Float(f) => Some(Number::Float(*f)),
        _ => None,
    }
}

fn compare_numbers(a: Number, b: Number) -> Option<Ordering> {
    match (a, b) {
        (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
        (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
    }
}

/// `==` / `!=`: operands of the same variant, with int and float forming
/// one numeric family.
fn values_equal(left: &Value, right: &Value, op: BinaryOp) -> Result<bool, LangError> {
    if let (Some(a), Some(b)) = (comparable_number(left), comparable_number(right)) {
        return Ok(compare_numbers(a, b) == Some(Ordering::Equal));
    }
    if discriminant(left) == discriminant(right) {
        return Ok(left == right);
    }
    Err(binary_type_mismatch(op, left.type_name(), right.type_name()))
}

fn eval_ordering(left: &Value, right: &Value, op: BinaryOp) -> Result<Value, LangError> {
    let ordering = match (left, right) {
        (Value::Str(a), Value::Str(b)) => Some(a.as_str().cmp(b.as_str())),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        _ => match (comparable_number(left), comparable_number(right)) {
            (Some(a), Some(b)) => compare_numbers(a, b),
            _ => {
                return Err(binary_type_mismatch(
                    op,
                    left.type_name(),
                    right.type_name(),
                ))
            }
        },
    };
    // An unordered pair (NaN) satisfies no comparison.
    let result = match (op, ordering) {
        (_, None) => false,
        (BinaryOp::Lt, Some(o)) => o == Ordering::Less,
        (BinaryOp::LtEq, Some(o)) => o != Ordering::Greater,
        (BinaryOp::Gt, Some(o)) => o == Ordering::Greater,
        (BinaryOp::GtEq, Some(o)) => o != Ordering::Less,
        _ => return Err(binary_type_mismatch(op, left.type_name(), right.type_name())),
    };
    Ok(Value::Bool(result))
}
