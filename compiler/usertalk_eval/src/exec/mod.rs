//! Evaluation helpers split out of the interpreter core.
//!
//! - `call`: argument binding for user-function calls
//! - `control`: conditionals, loops and `try`

pub mod call;
pub mod control;
