//! Scope chain for variable and function bindings.
//!
//! Uses a scope stack (not cloning) for block scopes, and a fresh stack rooted
//! at the defining scope for each function activation.
//!
//! # Ownership
//!
//! Every scope lives behind a [`LocalScope`] (reference-counted). A scope is
//! exclusively owned by the stack entry that created it until one of two
//! things hands out a second reference:
//!
//! - `push_scope` stores the current scope as the new child's parent;
//! - `activation` stores a function's defining scope as the parent of the
//!   activation scope, for as long as the activation runs.
//!
//! Parents never point at children and functions are stored as plain
//! `Arc<FunctionNode>`s, so the chain is acyclic and every scope is released
//! when its last child or activation is gone.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use usertalk_ir::{FunctionNode, Name};
use usertalk_values::Value;

/// A single-threaded scope wrapper for reference-counted interior mutability.
///
/// Wraps `Rc<RefCell<T>>` so every scope allocation goes through
/// [`LocalScope::new`]. Scopes belong to one script evaluation and are never
/// shared across threads, hence `Rc` rather than `Arc`.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles refer to the same scope.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A single scope: variables, functions and the enclosing scope.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    vars: FxHashMap<Name, Value>,
    functions: FxHashMap<Name, Arc<FunctionNode>>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    /// Create a new empty scope with no parent.
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            vars: FxHashMap::default(),
            functions: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    pub fn parent(&self) -> Option<&LocalScope<Scope>> {
        self.parent.as_ref()
    }

    /// Bind `name` in this scope, shadowing any outer binding.
    #[inline]
    pub fn define_local(&mut self, name: Name, value: Value) {
        self.vars.insert(name, value);
    }

    /// Whether this scope itself (not an ancestor) binds `name`.
    pub fn binds(&self, name: &Name) -> bool {
        self.vars.contains_key(name)
    }

    /// Look `name` up through the chain, innermost first.
    pub fn lookup(&self, name: &Name) -> Option<Value> {
        if let Some(value) = self.vars.get(name) {
            return Some(value.clone());
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.borrow().lookup(name))
    }

    /// Assign to the innermost scope that already binds `name`, or bind it
    /// here when no scope in the chain does.
    pub fn assign(&mut self, name: Name, value: Value) {
        if let Some(value) = self.assign_existing(&name, value) {
            self.vars.insert(name, value);
        }
    }

    /// Hands `value` back when nothing in the chain binds `name`.
    fn assign_existing(&mut self, name: &Name, value: Value) -> Option<Value> {
        if let Some(slot) = self.vars.get_mut(name) {
            *slot = value;
            return None;
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign_existing(name, value),
            None => Some(value),
        }
    }

    /// Define a function in this scope, replacing a same-named one.
    pub fn define_function(&mut self, function: Arc<FunctionNode>) -> Option<Arc<FunctionNode>> {
        self.functions.insert(function.name().clone(), function)
    }

    /// Number of variables bound in this scope.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl LocalScope<Scope> {
    /// Resolve a user function through the chain.
    ///
    /// Returns the function together with the scope that defines it; an
    /// activation of the function is rooted at that scope.
    pub fn lookup_function(&self, name: &Name) -> Option<(Arc<FunctionNode>, LocalScope<Scope>)> {
        let mut current = self.clone();
        loop {
            let parent = {
                let scope = current.borrow();
                if let Some(function) = scope.functions.get(name) {
                    return Some((Arc::clone(function), current.clone()));
                }
                scope.parent.clone()
            };
            current = parent?;
        }
    }
}

/// Environment for the interpreter using a scope stack.
///
/// Block scopes are pushed and popped on the stack; a function activation
/// gets its own environment whose bottom scope is a child of the function's
/// defining scope.
pub struct Environment {
    /// Stack of scopes, with current scope at the top.
    scopes: Vec<LocalScope<Scope>>,
    /// Global scope (end of every chain).
    global: LocalScope<Scope>,
}

impl Environment {
    /// Create a new environment with a fresh global scope.
    pub fn new() -> Self {
        Environment::with_global(LocalScope::new(Scope::new()))
    }

    /// Create an environment evaluating directly in `global`.
    pub fn with_global(global: LocalScope<Scope>) -> Self {
        Environment {
            scopes: vec![global.clone()],
            global,
        }
    }

    /// Get the current scope depth.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Push a new child of the current scope.
    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current_scope();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Pop the current scope. The bottom scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    #[inline]
    pub fn current_scope(&self) -> LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.global).clone()
    }

    pub fn global(&self) -> &LocalScope<Scope> {
        &self.global
    }

    /// Bind `name` in the current scope regardless of outer bindings.
    #[inline]
    pub fn define_local(&mut self, name: Name, value: Value) {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow_mut()
            .define_local(name, value);
    }

    #[inline]
    pub fn lookup(&self, name: &Name) -> Option<Value> {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow()
            .lookup(name)
    }

    #[inline]
    pub fn assign(&mut self, name: Name, value: Value) {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow_mut()
            .assign(name, value);
    }

    pub fn define_global(&mut self, name: Name, value: Value) {
        self.global.borrow_mut().define_local(name, value);
    }

    /// Define a function in the current scope.
    pub fn define_function(&mut self, function: Arc<FunctionNode>) {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow_mut()
            .define_function(function);
    }

    pub fn lookup_function(&self, name: &Name) -> Option<(Arc<FunctionNode>, LocalScope<Scope>)> {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .lookup_function(name)
    }

    /// Environment for one function activation.
    ///
    /// The activation scope's parent is `defining`, not the caller's
    /// current scope; the global scope is shared with the caller.
    #[must_use]
    pub fn activation(&self, defining: LocalScope<Scope>) -> Self {
        Environment {
            scopes: vec![LocalScope::new(Scope::with_parent(defining))],
            global: self.global.clone(),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
