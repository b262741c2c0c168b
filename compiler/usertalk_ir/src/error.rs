//! Errors raised while building a code tree.

use crate::TextPosition;

/// A code tree that violates a syntactic invariant.
///
/// These are properties of the source text, so they are reported when the
/// parser constructs the node rather than when a call is evaluated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Two parameters of one function definition share a name (case-insensitive).
    #[error("duplicate parameter `{name}` in definition of `{function}`")]
    DuplicateParameter {
        function: String,
        name: String,
        position: TextPosition,
    },
}

impl TreeError {
    /// Position of the offending syntax.
    pub fn position(&self) -> TextPosition {
        match self {
            TreeError::DuplicateParameter { position, .. } => *position,
        }
    }
}
