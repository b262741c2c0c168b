//! RAII-style scope guards for Interpreter environment management.
//!
//! - [`ScopedInterpreter`] pushes a child scope and pops it on drop.
//! - [`ActivationInterpreter`] swaps in a function activation's environment
//!   and restores the caller's on drop.
//!
//! Both hold `&mut Interpreter` and implement `Deref`/`DerefMut`, so code
//! inside the guard uses the interpreter as usual. Cleanup runs on every exit
//! path, including `?` returns and unwinding.
//!
//! ```text
//! interpreter.with_env_scope(|scoped| {
//!     scoped.env.define_local(name, value);
//!     scoped.eval_block_statements(body)
//! })
//! ```

use std::ops::{Deref, DerefMut};

use usertalk_ir::Name;
use usertalk_values::Value;

use super::Interpreter;
use crate::Environment;

/// Guard that pops the scope it pushed when dropped.
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

/// Guard that runs an activation in its own environment.
///
/// The caller's environment is parked in the guard and put back on drop.
pub(crate) struct ActivationInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
    caller_env: Option<Environment>,
}

impl Drop for ActivationInterpreter<'_> {
    fn drop(&mut self) {
        if let Some(env) = self.caller_env.take() {
            self.interpreter.env = env;
        }
    }
}

impl Deref for ActivationInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ActivationInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Push a child scope that is popped when the returned guard drops.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_> {
        self.env.push_scope();
        ScopedInterpreter { interpreter: self }
    }

    /// Run `f` in a new child scope.
    pub fn with_env_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }

    /// Run `f` in a new child scope holding one binding.
    pub fn with_binding<T, F>(&mut self, name: Name, value: Value, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped();
        scoped.env.define_local(name, value);
        f(&mut scoped)
    }

    /// Swap in `env` until the returned guard drops.
    pub(crate) fn activation(&mut self, env: Environment) -> ActivationInterpreter<'_> {
        let caller_env = std::mem::replace(&mut self.env, env);
        ActivationInterpreter {
            interpreter: self,
            caller_env: Some(caller_env),
        }
    }
}
