//! Error taxonomy shared by the evaluator, the verb registry and verb tables.
//!
//! # Structured Error Categories
//!
//! `LangErrorKind` is a closed set of failure categories. It is extended only
//! by adding variants, never by reusing an existing variant for a new meaning.
//! Factory functions (e.g. `undefined_identifier()`) are the public API for
//! creating errors; the position is attached afterwards, nearest the point of
//! detection, with [`LangError::with_position`] or
//! [`LangError::with_position_if_missing`].
//!
//! # Control Signals
//!
//! `return`, `break` and `continue` are not errors, but they unwind through
//! the same channel: [`ControlAction`] is the `Err` side of [`EvalResult`].
//! Only the `Error` variant ever leaves a public entry point.

use std::fmt;

use usertalk_ir::{BinaryOp, TextPosition, TreeError, UnaryOp};

use crate::Value;

/// Result of evaluating one node.
pub type EvalResult = Result<Value, ControlAction>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LangErrorKind {
    /// A variable reference or named argument names nothing in scope.
    #[error("undefined identifier `{name}`")]
    UndefinedIdentifier { name: String },

    /// Two parameters of one definition share a name.
    #[error("duplicate parameter `{name}` in definition of `{function}`")]
    DuplicateParameter { function: String, name: String },

    /// One call binds the same parameter twice.
    #[error("parameter `{name}` of `{callee}` is bound more than once")]
    DuplicateArgument { callee: String, name: String },

    /// Argument count outside `min..=max`.
    #[error("`{callee}` expects {}, got {got}", expected_arguments(.min, .max))]
    ArgumentCountMismatch {
        callee: String,
        min: usize,
        max: usize,
        got: usize,
    },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// No verb table answers to this name. `recognized` is set when a table
    /// knows the name but has no working implementation for it.
    #[error("{}", verb_not_found_message(.verb, .recognized))]
    VerbNotFound { verb: String, recognized: bool },

    /// A runtime limit (recursion depth, call budget) was reached.
    #[error("resource exhausted: {resource} limit of {limit} reached")]
    ResourceExhausted { resource: String, limit: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: String },

    /// `break` or `continue` escaped every enclosing loop.
    #[error("`{keyword}` outside of a loop")]
    MisplacedControl { keyword: &'static str },

    /// Failure reported by the host through a verb table.
    #[error("{message}")]
    Host { message: String },
}

#[allow(
    clippy::trivially_copy_pass_by_ref,
    reason = "thiserror passes fields by reference"
)]
fn expected_arguments(min: &usize, max: &usize) -> String {
    let plural = |n: usize| if n == 1 { "" } else { "s" };
    if min == max {
        format!("{min} argument{}", plural(*min))
    } else {
        format!("{min} to {max} arguments")
    }
}

#[allow(
    clippy::trivially_copy_pass_by_ref,
    reason = "thiserror passes fields by reference"
)]
fn verb_not_found_message(verb: &str, recognized: &bool) -> String {
    if *recognized {
        format!("verb `{verb}` is recognized but not implemented")
    } else {
        format!("verb `{verb}` not found")
    }
}

impl LangErrorKind {
    /// Variant name without payload, for logging and test assertions.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::UndefinedIdentifier { .. } => "UndefinedIdentifier",
            Self::DuplicateParameter { .. } => "DuplicateParameter",
            Self::DuplicateArgument { .. } => "DuplicateArgument",
            Self::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            Self::TypeMismatch { .. } => "TypeMismatch",
            Self::VerbNotFound { .. } => "VerbNotFound",
            Self::ResourceExhausted { .. } => "ResourceExhausted",
            Self::DivisionByZero => "DivisionByZero",
            Self::IntegerOverflow { .. } => "IntegerOverflow",
            Self::MisplacedControl { .. } => "MisplacedControl",
            Self::Host { .. } => "Host",
        }
    }
}

/// Secondary context attached to an error, such as "defined here".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LangNote {
    pub message: String,
    pub position: Option<TextPosition>,
}

impl LangNote {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
        }
    }

    pub fn at(message: impl Into<String>, position: TextPosition) -> Self {
        Self {
            message: message.into(),
            position: Some(position),
        }
    }
}

/// One active user-function frame at the point an error was raised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function name as spelled at its definition.
    pub name: String,
    /// Position of the call site.
    pub position: Option<TextPosition>,
}

/// Snapshot of the activation stack, most recent call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LangBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl LangBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for LangBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "script backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(position) = frame.position {
                write!(f, " at {position}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A recoverable scripting failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct LangError {
    kind: LangErrorKind,
    position: Option<TextPosition>,
    notes: Vec<LangNote>,
    trace: Option<LangBacktrace>,
}

impl LangError {
    /// Create an error from its kind. Prefer the factory functions.
    pub fn new(kind: LangErrorKind) -> Self {
        Self {
            kind,
            position: None,
            notes: Vec::new(),
            trace: None,
        }
    }

    #[inline]
    pub fn kind(&self) -> &LangErrorKind {
        &self.kind
    }

    #[inline]
    pub fn position(&self) -> Option<TextPosition> {
        self.position
    }

    pub fn notes(&self) -> &[LangNote] {
        &self.notes
    }

    pub fn backtrace(&self) -> Option<&LangBacktrace> {
        self.trace.as_ref()
    }

    /// The kind's message, without position or backtrace.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Set the position, replacing any previous one.
    #[must_use]
    pub fn with_position(mut self, position: TextPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the position unless a lower layer already attached a nearer one.
    #[must_use]
    pub fn with_position_if_missing(mut self, position: TextPosition) -> Self {
        if self.position.is_none() {
            self.position = Some(position);
        }
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: LangNote) -> Self {
        self.notes.push(note);
        self
    }

    /// Attach a backtrace. The first (innermost) capture wins.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: LangBacktrace) -> Self {
        if self.trace.is_none() {
            self.trace = Some(backtrace);
        }
        self
    }
}

impl From<TreeError> for LangError {
    fn from(err: TreeError) -> Self {
        let position = err.position();
        match err {
            TreeError::DuplicateParameter { function, name, .. } => {
                LangError::new(LangErrorKind::DuplicateParameter { function, name })
                    .with_position(position)
            }
        }
    }
}

/// Non-local exit from a node's evaluation.
///
/// Collapsed at the matching boundary: `Return` at the function activation,
/// `Break`/`Continue` at the nearest loop, `Error` at a `try` node or the
/// public entry point.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlAction {
    Error(Box<LangError>),
    Break,
    Continue,
    Return(Value),
}

impl ControlAction {
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, ControlAction::Error(_))
    }

    /// Convert to an error for a signal that reached a boundary that cannot
    /// absorb it. `Return` becomes a misplaced `return` only where the caller
    /// decided it is one.
    pub fn into_lang_error(self) -> LangError {
        match self {
            ControlAction::Error(e) => *e,
            ControlAction::Break => misplaced_control("break"),
            ControlAction::Continue => misplaced_control("continue"),
            ControlAction::Return(_) => misplaced_control("return"),
        }
    }
}

impl From<LangError> for ControlAction {
    #[inline]
    fn from(err: LangError) -> Self {
        ControlAction::Error(Box::new(err))
    }
}

// Factories

#[cold]
pub fn undefined_identifier(name: &str) -> LangError {
    LangError::new(LangErrorKind::UndefinedIdentifier {
        name: name.to_string(),
    })
}

#[cold]
pub fn duplicate_argument(callee: &str, name: &str) -> LangError {
    LangError::new(LangErrorKind::DuplicateArgument {
        callee: callee.to_string(),
        name: name.to_string(),
    })
}

/// Argument count outside the accepted range. `min == max` for functions
/// without defaults.
#[cold]
pub fn argument_count_mismatch(callee: &str, min: usize, max: usize, got: usize) -> LangError {
    LangError::new(LangErrorKind::ArgumentCountMismatch {
        callee: callee.to_string(),
        min,
        max,
        got,
    })
}

#[cold]
pub fn type_mismatch(expected: &str, found: &str) -> LangError {
    LangError::new(LangErrorKind::TypeMismatch {
        expected: expected.to_string(),
        found: found.to_string(),
    })
}

/// Operand types not accepted by a binary operator.
#[cold]
pub fn binary_type_mismatch(op: BinaryOp, left: &str, right: &str) -> LangError {
    LangError::new(LangErrorKind::TypeMismatch {
        expected: format!("compatible operands for `{}`", op.as_symbol()),
        found: format!("{left} and {right}"),
    })
}

/// Operand type not accepted by a unary operator.
#[cold]
pub fn unary_type_mismatch(op: UnaryOp, operand: &str) -> LangError {
    LangError::new(LangErrorKind::TypeMismatch {
        expected: format!("a number for `{}`", op.as_symbol()),
        found: operand.to_string(),
    })
}

#[cold]
pub fn verb_not_found(verb: &str) -> LangError {
    LangError::new(LangErrorKind::VerbNotFound {
        verb: verb.to_string(),
        recognized: false,
    })
}

/// A verb the table knows by name but cannot perform.
#[cold]
pub fn verb_not_implemented(verb: &str) -> LangError {
    LangError::new(LangErrorKind::VerbNotFound {
        verb: verb.to_string(),
        recognized: true,
    })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> LangError {
    LangError::new(LangErrorKind::ResourceExhausted {
        resource: "recursion depth".to_string(),
        limit,
    })
}

#[cold]
pub fn call_budget_exceeded(budget: usize) -> LangError {
    LangError::new(LangErrorKind::ResourceExhausted {
        resource: "call budget".to_string(),
        limit: budget,
    })
}

#[cold]
pub fn division_by_zero() -> LangError {
    LangError::new(LangErrorKind::DivisionByZero)
}

#[cold]
pub fn integer_overflow(operation: &str) -> LangError {
    LangError::new(LangErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

#[cold]
pub fn misplaced_control(keyword: &'static str) -> LangError {
    LangError::new(LangErrorKind::MisplacedControl { keyword })
}

/// Pass-through for failures reported by the host delegate.
#[cold]
pub fn host_error(message: impl Into<String>) -> LangError {
    LangError::new(LangErrorKind::Host {
        message: message.into(),
    })
}
