//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use std::sync::Arc;

use usertalk_verbs::{NullDelegate, SharedVerbRegistry, VerbAppDelegate};

use super::Interpreter;
use crate::diagnostics::CallStack;
use crate::eval_mode::{EvalMode, ModeState};
use crate::{Environment, LocalScope, Scope};

/// Builder for creating Interpreter instances.
///
/// Unset parts default to: a fresh global scope, a registry holding the
/// built-in verb tables, a [`NullDelegate`] host, and `EvalMode::Interpret`.
#[derive(Default)]
pub struct InterpreterBuilder {
    env: Option<Environment>,
    registry: Option<SharedVerbRegistry>,
    delegate: Option<Arc<dyn VerbAppDelegate>>,
    mode: EvalMode,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the evaluation mode (recursion limit and call budget).
    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Evaluate directly in `scope`; top-level definitions land there.
    #[must_use]
    pub fn global_scope(mut self, scope: LocalScope<Scope>) -> Self {
        self.env = Some(Environment::with_global(scope));
        self
    }

    /// Share `registry` with other interpreters.
    #[must_use]
    pub fn registry(mut self, registry: SharedVerbRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn delegate(mut self, delegate: Arc<dyn VerbAppDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    pub fn build(self) -> Interpreter {
        let call_stack = CallStack::new(self.mode.max_recursion_depth());
        let mode_state = ModeState::new(&self.mode);
        Interpreter {
            env: self.env.unwrap_or_default(),
            registry: self.registry.unwrap_or_default(),
            delegate: self.delegate.unwrap_or_else(|| Arc::new(NullDelegate)),
            mode: self.mode,
            mode_state,
            call_stack,
        }
    }
}
