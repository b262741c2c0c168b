//! UserTalk IR - code tree types for the UserTalk interpreter.
//!
//! This crate contains the data structures the parser hands to the evaluator:
//! - `TextPosition` for source locations
//! - `Name` for case-insensitive identifiers
//! - `CodeTreeNode` and its per-operation payloads
//!
//! # Design Philosophy
//!
//! - **One variant per operation**: `NodeKind` is a sum type, so the evaluator's
//!   dispatch over node kinds is checked for exhaustiveness at build time.
//! - **Validate at construction**: properties of the syntax (duplicate parameter
//!   names) are rejected when the node is built, never when it is evaluated.
//! - **Immutable after construction**: nodes expose accessors, not setters.

pub mod ast;
mod error;
mod name;
mod position;

pub use ast::{
    Argument, BinaryOp, BlockNode, CodeTreeNode, CodeTreeOperation, FunctionNode, Literal,
    LocalDecl, LoopKind, LoopNode, NodeKind, ParamNode, TypeHint, UnaryOp,
};
pub use error::TreeError;
pub use name::{fold_case, Name};
pub use position::TextPosition;

/// Trait for items that carry a source position.
pub trait Positioned {
    /// Get the position of this item.
    fn position(&self) -> TextPosition;
}
