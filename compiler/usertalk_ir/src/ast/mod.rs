//! Code tree nodes.
//!
//! A `CodeTreeNode` is an operation tag's payload (`NodeKind`) plus the
//! `TextPosition` it was parsed from. Children are owned exclusively by their
//! parent; the only shared payload is `FunctionNode`, held in an `Arc` so
//! that a defined function can outlive the borrow of the tree that defined it.
//!
//! # Construction
//!
//! The parser (external to this workspace) builds nodes through the
//! constructor functions on `CodeTreeNode`. Tests use the same functions:
//!
//! ```text
//! let sum = CodeTreeNode::binary(BinaryOp::Add, one, two, pos);
//! let call = CodeTreeNode::call("f", vec![Argument::positional(sum)], pos);
//! ```

mod function;
mod literal;
mod operators;


use std::fmt;
use std::sync::Arc;

use crate::{Name, Positioned, TextPosition};

pub use function::{FunctionNode, ParamNode};
pub use literal::{Literal, TypeHint};
pub use operators::{BinaryOp, UnaryOp};

/// Closed set of operation tags.
///
/// Every `NodeKind` variant maps to exactly one tag; see
/// [`CodeTreeNode::operation`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CodeTreeOperation {
    Literal,
    ListCtor,
    RecordCtor,
    Binary,
    Unary,
    VariableRef,
    Assign,
    Local,
    FunctionDef,
    FunctionCall,
    VerbCall,
    Block,
    Conditional,
    Loop,
    Break,
    Continue,
    Return,
    Try,
}

/// A call argument, positional or `name: value`.
#[derive(Clone, Debug)]
pub struct Argument {
    pub name: Option<Name>,
    pub value: CodeTreeNode,
}

impl Argument {
    pub fn positional(value: CodeTreeNode) -> Self {
        Argument { name: None, value }
    }

    pub fn named(name: impl Into<Name>, value: CodeTreeNode) -> Self {
        Argument {
            name: Some(name.into()),
            value,
        }
    }
}

/// One entry of a `local (...)` declaration.
#[derive(Clone, Debug)]
pub struct LocalDecl {
    pub name: Name,
    pub init: Option<CodeTreeNode>,
    pub position: TextPosition,
}

/// A braced statement sequence.
#[derive(Clone, Debug, Default)]
pub struct BlockNode {
    statements: Vec<CodeTreeNode>,
}

impl BlockNode {
    pub fn new(statements: Vec<CodeTreeNode>) -> Self {
        BlockNode { statements }
    }

    #[inline]
    pub fn statements(&self) -> &[CodeTreeNode] {
        &self.statements
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// Iteration shape of a loop.
#[derive(Clone, Debug)]
pub enum LoopKind {
    /// `while guard { ... }`
    While { guard: Box<CodeTreeNode> },
    /// `for counter = start to end { ... }` (or `downto` when `descending`)
    Counted {
        counter: Name,
        start: Box<CodeTreeNode>,
        end: Box<CodeTreeNode>,
        descending: bool,
    },
    /// `for item in list { ... }`
    Each {
        item: Name,
        collection: Box<CodeTreeNode>,
    },
}

/// A loop and its body.
#[derive(Clone, Debug)]
pub struct LoopNode {
    pub kind: LoopKind,
    pub body: BlockNode,
}

/// Operation-specific payload of a node.
#[derive(Clone, Debug)]
pub enum NodeKind {
    Literal(Literal),
    /// `{a, b, c}`
    ListCtor(Vec<CodeTreeNode>),
    /// `{"key": value, ...}`; keys in insertion order.
    RecordCtor(Vec<(String, CodeTreeNode)>),
    Binary {
        op: BinaryOp,
        left: Box<CodeTreeNode>,
        right: Box<CodeTreeNode>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<CodeTreeNode>,
    },
    VariableRef(Name),
    Assign {
        target: Name,
        value: Box<CodeTreeNode>,
    },
    Local(Vec<LocalDecl>),
    FunctionDef(Arc<FunctionNode>),
    /// Call by bare name: user functions first, then verb dispatch.
    FunctionCall {
        callee: Name,
        args: Vec<Argument>,
    },
    /// Call of a qualified verb (`namespace.verb`), bypassing user functions.
    VerbCall {
        verb: Name,
        args: Vec<Argument>,
    },
    Block(BlockNode),
    Conditional {
        condition: Box<CodeTreeNode>,
        then_block: BlockNode,
        else_block: Option<BlockNode>,
    },
    Loop(LoopNode),
    Break,
    Continue,
    Return(Option<Box<CodeTreeNode>>),
    /// `try { body } else { handler }`
    Try {
        body: BlockNode,
        handler: Option<BlockNode>,
    },
}

/// One node of the parsed script.
#[derive(Clone)]
pub struct CodeTreeNode {
    kind: NodeKind,
    position: TextPosition,
}

impl CodeTreeNode {
    pub fn new(kind: NodeKind, position: TextPosition) -> Self {
        CodeTreeNode { kind, position }
    }

    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The operation tag of this node.
    pub fn operation(&self) -> CodeTreeOperation {
        match &self.kind {
            NodeKind::Literal(_) => CodeTreeOperation::Literal,
            NodeKind::ListCtor(_) => CodeTreeOperation::ListCtor,
            NodeKind::RecordCtor(_) => CodeTreeOperation::RecordCtor,
            NodeKind::Binary { .. } => CodeTreeOperation::Binary,
            NodeKind::Unary { .. } => CodeTreeOperation::Unary,
            NodeKind::VariableRef(_) => CodeTreeOperation::VariableRef,
            NodeKind::Assign { .. } => CodeTreeOperation::Assign,
            NodeKind::Local(_) => CodeTreeOperation::Local,
            NodeKind::FunctionDef(_) => CodeTreeOperation::FunctionDef,
            NodeKind::FunctionCall { .. } => CodeTreeOperation::FunctionCall,
            NodeKind::VerbCall { .. } => CodeTreeOperation::VerbCall,
            NodeKind::Block(_) => CodeTreeOperation::Block,
            NodeKind::Conditional { .. } => CodeTreeOperation::Conditional,
            NodeKind::Loop(_) => CodeTreeOperation::Loop,
            NodeKind::Break => CodeTreeOperation::Break,
            NodeKind::Continue => CodeTreeOperation::Continue,
            NodeKind::Return(_) => CodeTreeOperation::Return,
            NodeKind::Try { .. } => CodeTreeOperation::Try,
        }
    }

    // Constructors

    pub fn literal(literal: Literal, position: TextPosition) -> Self {
        Self::new(NodeKind::Literal(literal), position)
    }

    pub fn list(items: Vec<CodeTreeNode>, position: TextPosition) -> Self {
        Self::new(NodeKind::ListCtor(items), position)
    }

    pub fn record(entries: Vec<(String, CodeTreeNode)>, position: TextPosition) -> Self {
        Self::new(NodeKind::RecordCtor(entries), position)
    }

    pub fn binary(
        op: BinaryOp,
        left: CodeTreeNode,
        right: CodeTreeNode,
        position: TextPosition,
    ) -> Self {
        Self::new(
            NodeKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            position,
        )
    }

    pub fn unary(op: UnaryOp, operand: CodeTreeNode, position: TextPosition) -> Self {
        Self::new(
            NodeKind::Unary {
                op,
                operand: Box::new(operand),
            },
            position,
        )
    }

    pub fn variable(name: impl Into<Name>, position: TextPosition) -> Self {
        Self::new(NodeKind::VariableRef(name.into()), position)
    }

    pub fn assign(target: impl Into<Name>, value: CodeTreeNode, position: TextPosition) -> Self {
        Self::new(
            NodeKind::Assign {
                target: target.into(),
                value: Box::new(value),
            },
            position,
        )
    }

    pub fn local(decls: Vec<LocalDecl>, position: TextPosition) -> Self {
        Self::new(NodeKind::Local(decls), position)
    }

    pub fn function(def: FunctionNode) -> Self {
        let position = def.position();
        Self::new(NodeKind::FunctionDef(Arc::new(def)), position)
    }

    pub fn call(callee: impl Into<Name>, args: Vec<Argument>, position: TextPosition) -> Self {
        Self::new(
            NodeKind::FunctionCall {
                callee: callee.into(),
                args,
            },
            position,
        )
    }

    pub fn verb_call(verb: impl Into<Name>, args: Vec<Argument>, position: TextPosition) -> Self {
        Self::new(
            NodeKind::VerbCall {
                verb: verb.into(),
                args,
            },
            position,
        )
    }

    pub fn block(statements: Vec<CodeTreeNode>, position: TextPosition) -> Self {
        Self::new(NodeKind::Block(BlockNode::new(statements)), position)
    }

    pub fn conditional(
        condition: CodeTreeNode,
        then_block: BlockNode,
        else_block: Option<BlockNode>,
        position: TextPosition,
    ) -> Self {
        Self::new(
            NodeKind::Conditional {
                condition: Box::new(condition),
                then_block,
                else_block,
            },
            position,
        )
    }

    pub fn while_loop(guard: CodeTreeNode, body: BlockNode, position: TextPosition) -> Self {
        Self::new(
            NodeKind::Loop(LoopNode {
                kind: LoopKind::While {
                    guard: Box::new(guard),
                },
                body,
            }),
            position,
        )
    }

    pub fn counted_loop(
        counter: impl Into<Name>,
        start: CodeTreeNode,
        end: CodeTreeNode,
        descending: bool,
        body: BlockNode,
        position: TextPosition,
    ) -> Self {
        Self::new(
            NodeKind::Loop(LoopNode {
                kind: LoopKind::Counted {
                    counter: counter.into(),
                    start: Box::new(start),
                    end: Box::new(end),
                    descending,
                },
                body,
            }),
            position,
        )
    }

    pub fn each_loop(
        item: impl Into<Name>,
        collection: CodeTreeNode,
        body: BlockNode,
        position: TextPosition,
    ) -> Self {
        Self::new(
            NodeKind::Loop(LoopNode {
                kind: LoopKind::Each {
                    item: item.into(),
                    collection: Box::new(collection),
                },
                body,
            }),
            position,
        )
    }

    pub fn break_node(position: TextPosition) -> Self {
        Self::new(NodeKind::Break, position)
    }

    pub fn continue_node(position: TextPosition) -> Self {
        Self::new(NodeKind::Continue, position)
    }

    pub fn return_node(value: Option<CodeTreeNode>, position: TextPosition) -> Self {
        Self::new(NodeKind::Return(value.map(Box::new)), position)
    }

    pub fn try_node(body: BlockNode, handler: Option<BlockNode>, position: TextPosition) -> Self {
        Self::new(NodeKind::Try { body, handler }, position)
    }
}

impl Positioned for CodeTreeNode {
    #[inline]
    fn position(&self) -> TextPosition {
        self.position
    }
}

impl fmt::Debug for CodeTreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.position)
    }
}
