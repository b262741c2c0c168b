//! Argument binding for user-function calls.
//!
//! Binding runs in three steps, all before the body is entered:
//!
//! 1. `bind_arguments` places positional arguments, then named ones, into
//!    parameter slots and checks arity.
//! 2. `bind_parameters_with_defaults` fills empty slots from default
//!    expressions, evaluated in the caller's scope.
//! 3. Type hints coerce each bound value.

use smallvec::SmallVec;
use usertalk_ir::{FunctionNode, Name, Positioned, TextPosition};
use usertalk_values::{
    argument_count_mismatch, duplicate_argument, undefined_identifier, ControlAction, LangError,
    Value,
};

use crate::Interpreter;

/// An argument after its expression has been evaluated.
#[derive(Clone, Debug)]
pub struct EvaluatedArg {
    pub name: Option<Name>,
    pub value: Value,
    /// Position of the argument expression.
    pub position: TextPosition,
}

/// Arguments of one call. Most calls pass only a few.
pub type EvaluatedArgs = SmallVec<[EvaluatedArg; 4]>;

/// Check that a call passing `got` arguments can be bound.
///
/// With default parameters, the valid range is:
/// - Minimum: number of parameters without defaults
/// - Maximum: total number of parameters
pub fn check_arg_count(function: &FunctionNode, got: usize) -> Result<(), LangError> {
    let required = function.required_param_count();
    let total = function.params().len();
    if got < required || got > total {
        return Err(arity_error(function, got));
    }
    Ok(())
}

fn arity_error(function: &FunctionNode, got: usize) -> LangError {
    argument_count_mismatch(
        function.name().as_str(),
        function.required_param_count(),
        function.params().len(),
        got,
    )
}

/// Place arguments into parameter slots.
///
/// Positional arguments fill slots in order; named arguments then fill the
/// slot of the parameter they name. A slot left empty must belong to a
/// parameter with a default.
pub fn bind_arguments(
    function: &FunctionNode,
    args: EvaluatedArgs,
) -> Result<Vec<Option<EvaluatedArg>>, LangError> {
    let params = function.params();
    let got = args.len();
    check_arg_count(function, got)?;

    let mut slots: Vec<Option<EvaluatedArg>> = params.iter().map(|_| None).collect();
    let (positional, named): (EvaluatedArgs, EvaluatedArgs) =
        args.into_iter().partition(|arg| arg.name.is_none());

    for (slot, arg) in slots.iter_mut().zip(positional) {
        *slot = Some(arg);
    }

    for arg in named {
        let Some(name) = &arg.name else {
            continue;
        };
        let index = function
            .param_index(name)
            .ok_or_else(|| undefined_identifier(name.as_str()).with_position(arg.position))?;
        let Some(slot) = slots.get_mut(index) else {
            continue;
        };
        if slot.is_some() {
            return Err(duplicate_argument(function.name().as_str(), name.as_str())
                .with_position(arg.position));
        }
        *slot = Some(arg);
    }

    let missing_required = params
        .iter()
        .zip(&slots)
        .any(|(param, slot)| slot.is_none() && !param.is_optional());
    if missing_required {
        return Err(arity_error(function, got));
    }
    Ok(slots)
}

/// Fill empty slots from defaults and apply type hints.
///
/// Defaults are evaluated in the interpreter's current environment, which
/// is still the caller's when this runs.
pub fn bind_parameters_with_defaults(
    interpreter: &mut Interpreter,
    function: &FunctionNode,
    slots: Vec<Option<EvaluatedArg>>,
) -> Result<Vec<Value>, ControlAction> {
    let mut values = Vec::with_capacity(slots.len());
    for (param, slot) in function.params().iter().zip(slots) {
        let (value, position) = match (slot, param.default()) {
            (Some(arg), _) => (arg.value, arg.position),
            (None, Some(default)) => (interpreter.eval(default)?, default.position()),
            (None, None) => return Err(arity_error(function, values.len()).into()),
        };
        let value = match param.hint() {
            Some(hint) => value
                .coerce_to(hint)
                .map_err(|err| err.with_position_if_missing(position))?,
            None => value,
        };
        values.push(value);
    }
    Ok(values)
}
