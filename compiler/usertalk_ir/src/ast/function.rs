//! Function definitions and their parameter lists.

use rustc_hash::FxHashSet;

use super::{BlockNode, CodeTreeNode, TypeHint};
use crate::{Name, Positioned, TextPosition, TreeError};

/// One declared parameter of a function definition.
#[derive(Clone, Debug)]
pub struct ParamNode {
    name: Name,
    default: Option<CodeTreeNode>,
    hint: Option<TypeHint>,
    position: TextPosition,
}

impl ParamNode {
    /// A required parameter.
    pub fn new(name: impl Into<Name>, position: TextPosition) -> Self {
        ParamNode {
            name: name.into(),
            default: None,
            hint: None,
            position,
        }
    }

    /// Attach a default-value expression, evaluated in the caller's scope
    /// when the argument is omitted.
    #[must_use]
    pub fn with_default(mut self, default: CodeTreeNode) -> Self {
        self.default = Some(default);
        self
    }

    /// Attach a type hint used to coerce the bound argument.
    #[must_use]
    pub fn with_hint(mut self, hint: TypeHint) -> Self {
        self.hint = Some(hint);
        self
    }

    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[inline]
    pub fn default(&self) -> Option<&CodeTreeNode> {
        self.default.as_ref()
    }

    #[inline]
    pub fn hint(&self) -> Option<TypeHint> {
        self.hint
    }

    /// Whether omitting this argument is permitted.
    #[inline]
    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }
}

impl Positioned for ParamNode {
    fn position(&self) -> TextPosition {
        self.position
    }
}

/// A user-defined function: `on name(params) { body }`.
///
/// Only constructible through [`FunctionNode::new`], which guarantees the
/// parameter names are unique. The evaluator relies on that when binding.
#[derive(Clone, Debug)]
pub struct FunctionNode {
    name: Name,
    params: Vec<ParamNode>,
    body: BlockNode,
    position: TextPosition,
}

impl FunctionNode {
    /// Build a function definition, rejecting duplicate parameter names.
    pub fn new(
        position: TextPosition,
        name: impl Into<Name>,
        params: Vec<ParamNode>,
        body: BlockNode,
    ) -> Result<Self, TreeError> {
        let name = name.into();
        let mut seen = FxHashSet::default();
        for param in &params {
            if !seen.insert(param.name.key()) {
                return Err(TreeError::DuplicateParameter {
                    function: name.as_str().to_string(),
                    name: param.name.as_str().to_string(),
                    position: param.position,
                });
            }
        }
        Ok(FunctionNode {
            name,
            params,
            body,
            position,
        })
    }

    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[inline]
    pub fn params(&self) -> &[ParamNode] {
        &self.params
    }

    #[inline]
    pub fn body(&self) -> &BlockNode {
        &self.body
    }

    /// Number of parameters without a default value.
    pub fn required_param_count(&self) -> usize {
        self.params.iter().filter(|p| !p.is_optional()).count()
    }

    /// Index of the parameter with the given name, if declared.
    pub fn param_index(&self, name: &Name) -> Option<usize> {
        self.params.iter().position(|p| p.name == *name)
    }
}

impl Positioned for FunctionNode {
    fn position(&self) -> TextPosition {
        self.position
    }
}
