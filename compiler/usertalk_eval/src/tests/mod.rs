//! Evaluator scenarios built from hand-assembled code trees.
//!
//! `build` holds the small constructors the scenario modules share.

mod scenario_tests;
mod verb_tests;

mod build {
    #![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

    use usertalk_ir::{
        Argument, BinaryOp, BlockNode, CodeTreeNode, FunctionNode, Literal, ParamNode,
        TextPosition,
    };
    use usertalk_values::{LangError, Value};

    use crate::Interpreter;

    pub const NO_POS: TextPosition = TextPosition::DUMMY;

    pub fn at(start: u32) -> TextPosition {
        TextPosition::new(start, start + 1)
    }

    pub fn int(n: i64) -> CodeTreeNode {
        CodeTreeNode::literal(Literal::Int(n), NO_POS)
    }

    pub fn text(s: &str) -> CodeTreeNode {
        CodeTreeNode::literal(Literal::string(s), NO_POS)
    }

    pub fn boolean(b: bool) -> CodeTreeNode {
        CodeTreeNode::literal(Literal::Bool(b), NO_POS)
    }

    pub fn var(name: &str) -> CodeTreeNode {
        CodeTreeNode::variable(name, NO_POS)
    }

    pub fn assign(name: &str, value: CodeTreeNode) -> CodeTreeNode {
        CodeTreeNode::assign(name, value, NO_POS)
    }

    pub fn bin(op: BinaryOp, left: CodeTreeNode, right: CodeTreeNode) -> CodeTreeNode {
        CodeTreeNode::binary(op, left, right, NO_POS)
    }

    pub fn call(name: &str, args: Vec<CodeTreeNode>) -> CodeTreeNode {
        call_at(name, args, NO_POS)
    }

    pub fn call_at(name: &str, args: Vec<CodeTreeNode>, position: TextPosition) -> CodeTreeNode {
        CodeTreeNode::call(
            name,
            args.into_iter().map(Argument::positional).collect(),
            position,
        )
    }

    pub fn block(statements: Vec<CodeTreeNode>) -> BlockNode {
        BlockNode::new(statements)
    }

    pub fn param(name: &str) -> ParamNode {
        ParamNode::new(name, NO_POS)
    }

    pub fn def(name: &str, params: Vec<ParamNode>, body: Vec<CodeTreeNode>) -> CodeTreeNode {
        CodeTreeNode::function(FunctionNode::new(NO_POS, name, params, block(body)).unwrap())
    }

    pub fn ret(value: CodeTreeNode) -> CodeTreeNode {
        CodeTreeNode::return_node(Some(value), NO_POS)
    }

    /// Evaluate top-level statements in a fresh interpreter.
    pub fn run(statements: Vec<CodeTreeNode>) -> Result<Value, LangError> {
        Interpreter::new().evaluate_statements(&statements)
    }

    /// Variant name of the error `statements` fail with.
    pub fn run_err(statements: Vec<CodeTreeNode>) -> &'static str {
        run(statements).unwrap_err().kind().variant_name()
    }
}
