//! Native stack growth for the recursive evaluator.
//!
//! The evaluator recurses once per code tree level and once per user-function
//! activation. Activation depth is bounded by the interpreter's recursion
//! limit; this crate keeps the native stack from running out first, so a
//! runaway script surfaces as a `ResourceExhausted` error rather than a
//! process abort.
//!
//! - **Native targets**: `stacker` grows the stack on demand.
//! - **WASM targets**: passthrough.

/// Grow the stack when less than this remains (100 KiB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1 MiB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the red zone.
///
/// ```text
/// fn eval(&mut self, node: &CodeTreeNode) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_inner(node))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
