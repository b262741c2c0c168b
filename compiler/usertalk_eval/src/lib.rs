//! UserTalk Eval - tree-walking evaluator for UserTalk code trees.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Environment`: scope stack over reference-counted `Scope`s
//! - `Interpreter`: recursive descent over `CodeTreeNode`s
//! - `evaluate_binary` / `evaluate_unary`: direct enum-based operator dispatch
//! - `SharedVerbRegistry` (from `usertalk_verbs`): `namespace.verb` calls
//! - `Value` and `LangError` (from `usertalk_values`)
//!
//! # Entry points
//!
//! [`evaluate`] runs one node against a scope with the default
//! configuration. Hosts that share a verb registry, supply a delegate or
//! bound resources build an [`Interpreter`] with [`InterpreterBuilder`].

mod diagnostics;
mod environment;
mod eval_mode;
pub mod exec;
pub mod interpreter;
mod operators;
mod unary_operators;

use std::sync::Once;

pub use usertalk_values::{ControlAction, EvalResult, LangError, LangErrorKind, Value};

pub use diagnostics::{CallFrame, CallStack};
pub use environment::{Environment, LocalScope, Scope};
pub use eval_mode::{BudgetExceeded, EvalMode, ModeState, DEFAULT_MAX_DEPTH, MAX_DEPTH_VAR};
pub use interpreter::{Interpreter, InterpreterBuilder, ScopedInterpreter};
pub use operators::evaluate_binary;
pub use unary_operators::evaluate_unary;

use usertalk_ir::CodeTreeNode;

/// Evaluate `node` with `scope` as the global scope.
///
/// Uses the built-in verb tables, no host delegate and the mode from
/// [`EvalMode::from_env`]. Definitions and assignments made by the node
/// persist in `scope`.
pub fn evaluate(node: &CodeTreeNode, scope: &LocalScope<Scope>) -> Result<Value, LangError> {
    Interpreter::builder()
        .global_scope(scope.clone())
        .mode(EvalMode::from_env())
        .build()
        .evaluate(node)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Installs an `EnvFilter` from `RUST_LOG` and a hierarchical layer, so
/// nested activations read as a tree. Safe to call multiple times; does
/// nothing unless `RUST_LOG` is set. Enable with
/// `RUST_LOG=usertalk_eval=debug` or `RUST_LOG=usertalk_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .try_init();
        }
    });
}

#[cfg(test)]
mod tests;
