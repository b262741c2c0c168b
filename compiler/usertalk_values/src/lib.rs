//! Runtime values and errors for the UserTalk interpreter.
//!
//! This crate is the leaf shared by the evaluator, the verb registry and every
//! verb table:
//! - `Value` and its coercion rules (`is_truthy`, `to_number`, `coerce_to`)
//! - `LangError` / `LangErrorKind`, the closed error taxonomy
//! - `ControlAction` and `EvalResult`, the channel non-local exits travel in

mod errors;
mod value;

pub use errors::{
    argument_count_mismatch, binary_type_mismatch, call_budget_exceeded, division_by_zero,
    duplicate_argument, host_error, integer_overflow, misplaced_control,
    recursion_limit_exceeded, type_mismatch, unary_type_mismatch, undefined_identifier,
    verb_not_found, verb_not_implemented, BacktraceFrame, ControlAction, EvalResult,
    LangBacktrace, LangError, LangErrorKind, LangNote,
};
pub use value::{Heap, Number, Record, Value, DATE_FORMAT};
