//! Control flow evaluation (conditionals, loops, try).
//!
//! Loops collapse `Break` and `Continue` from their body; every other
//! control action leaves the loop unchanged. `try` converts errors, and only
//! errors, back into values.

use tracing::debug;
use usertalk_ir::{BlockNode, CodeTreeNode, LoopKind, LoopNode, Name, Positioned, TypeHint};
use usertalk_values::{type_mismatch, ControlAction, EvalResult, Value};

use crate::Interpreter;

/// Name bound to the error message inside a `try` handler.
pub const TRY_ERROR: &str = "tryError";

/// What a loop does after one pass through its body.
#[derive(Debug)]
pub(crate) enum LoopAction {
    /// Run the next iteration.
    Continue,
    /// Leave the loop normally.
    Break,
    /// Leave the loop, propagating the action.
    Exit(ControlAction),
}

/// Map a control action from a loop body to the loop's next step.
pub(crate) fn to_loop_action(action: ControlAction) -> LoopAction {
    match action {
        ControlAction::Continue => LoopAction::Continue,
        ControlAction::Break => LoopAction::Break,
        other => LoopAction::Exit(other),
    }
}

impl Interpreter {
    /// Evaluate an if/else. Without an else branch a false condition yields nil.
    pub(crate) fn eval_conditional(
        &mut self,
        condition: &CodeTreeNode,
        then_block: &BlockNode,
        else_block: Option<&BlockNode>,
    ) -> EvalResult {
        if self.eval(condition)?.is_truthy() {
            self.eval_scoped_block(then_block)
        } else if let Some(else_block) = else_block {
            self.eval_scoped_block(else_block)
        } else {
            Ok(Value::Nil)
        }
    }

    /// Evaluate a loop. Loops yield nil.
    pub(crate) fn eval_loop(&mut self, node: &LoopNode) -> EvalResult {
        match &node.kind {
            LoopKind::While { guard } => {
                while self.eval(guard)?.is_truthy() {
                    match self.eval_loop_body(&node.body) {
                        LoopAction::Continue => {}
                        LoopAction::Break => break,
                        LoopAction::Exit(action) => return Err(action),
                    }
                }
            }
            LoopKind::Counted {
                counter,
                start,
                end,
                descending,
            } => {
                let start = self.eval_loop_bound(start)?;
                let end = self.eval_loop_bound(end)?;
                self.eval_counted(counter, start, end, *descending, &node.body)?;
            }
            LoopKind::Each { item, collection } => {
                let value = self.eval(collection)?;
                let items = value
                    .coerce_to(TypeHint::List)
                    .map_err(|err| err.with_position_if_missing(collection.position()))?;
                for element in items.as_list().unwrap_or_default() {
                    self.env.assign(item.clone(), element.clone());
                    match self.eval_loop_body(&node.body) {
                        LoopAction::Continue => {}
                        LoopAction::Break => break,
                        LoopAction::Exit(action) => return Err(action),
                    }
                }
            }
        }
        Ok(Value::Nil)
    }

    /// Inclusive counted loop. The counter is an ordinary assignment, so it
    /// stays visible after the loop.
    fn eval_counted(
        &mut self,
        counter: &Name,
        start: i64,
        end: i64,
        descending: bool,
        body: &BlockNode,
    ) -> Result<(), ControlAction> {
        let mut current = start;
        loop {
            let done = if descending {
                current < end
            } else {
                current > end
            };
            if done {
                return Ok(());
            }
            self.env.assign(counter.clone(), Value::Int(current));
            match self.eval_loop_body(body) {
                LoopAction::Continue => {}
                LoopAction::Break => return Ok(()),
                LoopAction::Exit(action) => return Err(action),
            }
            let next = if descending {
                current.checked_sub(1)
            } else {
                current.checked_add(1)
            };
            match next {
                Some(next) => current = next,
                None => return Ok(()),
            }
        }
    }

    fn eval_loop_bound(&mut self, node: &CodeTreeNode) -> Result<i64, ControlAction> {
        let value = self.eval(node)?;
        match value.coerce_to(TypeHint::Int) {
            Ok(Value::Int(n)) => Ok(n),
            Ok(other) => Err(type_mismatch("int", other.type_name())
                .with_position(node.position())
                .into()),
            Err(err) => Err(err.with_position_if_missing(node.position()).into()),
        }
    }

    fn eval_loop_body(&mut self, body: &BlockNode) -> LoopAction {
        match self.eval_scoped_block(body) {
            Ok(_) => LoopAction::Continue,
            Err(action) => to_loop_action(action),
        }
    }

    /// Evaluate `try { body } else { handler }`.
    ///
    /// An error from `body` runs `handler` in a child scope with `tryError`
    /// bound to the message; without a handler the result is `false`.
    /// Control actions pass through untouched.
    pub(crate) fn eval_try(
        &mut self,
        body: &BlockNode,
        handler: Option<&BlockNode>,
    ) -> EvalResult {
        match self.eval_scoped_block(body) {
            Err(ControlAction::Error(err)) => {
                debug!(error = %err, position = ?err.position(), "try caught error");
                match handler {
                    Some(handler) => self.with_binding(
                        Name::new(TRY_ERROR),
                        Value::string(err.message()),
                        |scoped| scoped.eval_block_statements(handler),
                    ),
                    None => Ok(Value::Bool(false)),
                }
            }
            other => other,
        }
    }
}
