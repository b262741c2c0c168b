//! Tree-walking interpreter for UserTalk code trees.
//!
//! # Architecture
//!
//! - `eval` dispatches on [`NodeKind`] (exhaustive match, one arm per
//!   operation tag).
//! - Non-local exits (`return`, `break`, `continue`) and errors share the
//!   `Err` side of [`EvalResult`] as [`ControlAction`]s. Loops collapse
//!   `Break`/`Continue`, activations collapse `Return`, `try` nodes and the
//!   public entry points collapse errors.
//! - Block scopes are pushed through the RAII guard in `scope_guard`, so
//!   every exit path pops them.
//!
//! # Sub-modules
//!
//! - `builder`: `InterpreterBuilder`
//! - `scope_guard`: `ScopedInterpreter`, `ActivationInterpreter`
//! - `function_call`: user-function activation and verb dispatch

mod builder;
mod function_call;
mod scope_guard;

use std::sync::Arc;

use tracing::trace;
use usertalk_ir::{
    BinaryOp, BlockNode, CodeTreeNode, LocalDecl, NodeKind, Positioned, TextPosition,
};
use usertalk_stack::ensure_sufficient_stack;
use usertalk_values::{undefined_identifier, ControlAction, EvalResult, LangError, Record, Value};
use usertalk_verbs::{SharedVerbRegistry, VerbAppDelegate};

use crate::diagnostics::CallStack;
use crate::eval_mode::{EvalMode, ModeState};
use crate::{evaluate_binary, evaluate_unary, Environment};

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

/// Tree-walking interpreter.
///
/// One interpreter evaluates one script at a time. It is not `Send`: scopes
/// are single-threaded. The verb registry and the host delegate are shared
/// handles and may be used by several interpreters on different threads.
pub struct Interpreter {
    /// Scope stack of the running activation.
    pub(crate) env: Environment,
    /// Verb tables reachable from `namespace.verb` calls.
    registry: SharedVerbRegistry,
    /// Host capability handle, passed through to every verb untouched.
    delegate: Arc<dyn VerbAppDelegate>,
    /// Resource policy.
    mode: EvalMode,
    /// Per-mode mutable state (call budget).
    pub(crate) mode_state: ModeState,
    /// Live user-function frames, for the depth limit and backtraces.
    pub(crate) call_stack: CallStack,
}

impl Interpreter {
    /// Interpreter with a fresh global scope and the built-in verb tables.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    #[inline]
    pub fn mode(&self) -> &EvalMode {
        &self.mode
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn registry(&self) -> &SharedVerbRegistry {
        &self.registry
    }

    /// Number of user-function activations currently running.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    /// Evaluate a root node.
    ///
    /// A top-level `return` yields its value; `break`/`continue` outside a
    /// loop fail with `MisplacedControl`.
    pub fn evaluate(&mut self, node: &CodeTreeNode) -> Result<Value, LangError> {
        self.eval(node)
            .or_else(|action| collapse_top_level(action, node.position()))
    }

    /// Evaluate top-level statements in order, in the current scope.
    ///
    /// Yields the last statement's value, or nil for an empty script.
    pub fn evaluate_statements(
        &mut self,
        statements: &[CodeTreeNode],
    ) -> Result<Value, LangError> {
        let mut last = Value::Nil;
        for statement in statements {
            match self.eval(statement) {
                Ok(value) => last = value,
                Err(action) => return collapse_top_level(action, statement.position()),
            }
        }
        Ok(last)
    }

    /// Evaluate one node.
    ///
    /// Errors leaving this node carry its position unless a nearer one is
    /// already attached.
    pub fn eval(&mut self, node: &CodeTreeNode) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(node))
            .map_err(|action| position_action(action, node.position()))
    }

    fn eval_inner(&mut self, node: &CodeTreeNode) -> EvalResult {
        trace!(operation = ?node.operation(), position = %node.position(), "eval");
        let position = node.position();
        match node.kind() {
            NodeKind::Literal(literal) => Ok(Value::from_literal(literal)),
            NodeKind::ListCtor(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval(item)?);
                }
                Ok(Value::list(values))
            }
            NodeKind::RecordCtor(entries) => {
                let mut record = Record::new();
                for (key, item) in entries {
                    let value = self.eval(item)?;
                    record.insert(key.as_str(), value);
                }
                Ok(Value::record(record))
            }
            NodeKind::Binary { op, left, right } => self.eval_binary(*op, left, right),
            NodeKind::Unary { op, operand } => {
                let value = self.eval(operand)?;
                Ok(evaluate_unary(&value, *op)?)
            }
            NodeKind::VariableRef(name) => self
                .env
                .lookup(name)
                .ok_or_else(|| undefined_identifier(name.as_str()).with_position(position).into()),
            NodeKind::Assign { target, value } => {
                let value = self.eval(value)?;
                self.env.assign(target.clone(), value.clone());
                Ok(value)
            }
            NodeKind::Local(decls) => self.eval_locals(decls),
            NodeKind::FunctionDef(function) => {
                self.env.define_function(Arc::clone(function));
                Ok(Value::Nil)
            }
            NodeKind::FunctionCall { callee, args } => self.eval_call(callee, args, position),
            NodeKind::VerbCall { verb, args } => self.eval_verb_call(verb, args, position),
            NodeKind::Block(block) => self.eval_scoped_block(block),
            NodeKind::Conditional {
                condition,
                then_block,
                else_block,
            } => self.eval_conditional(condition, then_block, else_block.as_ref()),
            NodeKind::Loop(loop_node) => self.eval_loop(loop_node),
            NodeKind::Break => Err(ControlAction::Break),
            NodeKind::Continue => Err(ControlAction::Continue),
            NodeKind::Return(value) => {
                let value = match value {
                    Some(node) => self.eval(node)?,
                    None => Value::Nil,
                };
                Err(ControlAction::Return(value))
            }
            NodeKind::Try { body, handler } => self.eval_try(body, handler.as_ref()),
        }
    }

    /// Operands left to right; `and`/`or` skip the right operand when the
    /// left one decides the result.
    fn eval_binary(
        &mut self,
        op: BinaryOp,
        left: &CodeTreeNode,
        right: &CodeTreeNode,
    ) -> EvalResult {
        let left = self.eval(left)?;
        if op.is_short_circuit() {
            let decided = left.is_truthy();
            if (op == BinaryOp::And && !decided) || (op == BinaryOp::Or && decided) {
                return Ok(Value::Bool(decided));
            }
            return Ok(Value::Bool(self.eval(right)?.is_truthy()));
        }
        let right = self.eval(right)?;
        Ok(evaluate_binary(left, right, op)?)
    }

    fn eval_locals(&mut self, decls: &[LocalDecl]) -> EvalResult {
        for decl in decls {
            let value = match &decl.init {
                Some(init) => self.eval(init)?,
                None => Value::Nil,
            };
            self.env.define_local(decl.name.clone(), value);
        }
        Ok(Value::Nil)
    }

    /// Statements in sequence, in the current scope. Yields the last
    /// statement's value, or nil for an empty block.
    pub(crate) fn eval_block_statements(&mut self, block: &BlockNode) -> EvalResult {
        let mut last = Value::Nil;
        for statement in block.statements() {
            last = self.eval(statement)?;
        }
        Ok(last)
    }

    /// A block in a fresh child scope, popped on every exit path.
    pub(crate) fn eval_scoped_block(&mut self, block: &BlockNode) -> EvalResult {
        self.with_env_scope(|scoped| scoped.eval_block_statements(block))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Attach `position` to an error that has none yet.
fn position_action(action: ControlAction, position: TextPosition) -> ControlAction {
    match action {
        ControlAction::Error(err) if err.position().is_none() => {
            ControlAction::Error(Box::new((*err).with_position(position)))
        }
        other => other,
    }
}

fn collapse_top_level(
    action: ControlAction,
    position: TextPosition,
) -> Result<Value, LangError> {
    match action {
        ControlAction::Return(value) => Ok(value),
        other => Err(other.into_lang_error().with_position_if_missing(position)),
    }
}
