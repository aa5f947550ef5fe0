use serde::{Deserialize, Serialize};

use lox_lexer::Token;

use crate::{Located, LiteralValue};

/// All expression forms in lox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expr {
    Literal(LiteralValue),
    Grouping(Box<GroupingExpr>),
    Unary(Box<UnaryExpr>),
    Binary(Box<BinaryExpr>),
    Logical(Box<LogicalExpr>),
    Variable(VariableExpr),
    Assign(Box<AssignExpr>),
    Call(Box<CallExpr>),
}

/// A parenthesized expression: `( expr )`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingExpr {
    pub inner: Expr,
}

/// `! operand` or `- operand`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub op: Token,
    pub operand: Expr,
}

impl Located for UnaryExpr {
    fn location(&self) -> &Token {
        &self.op
    }
}

/// `left op right` for arithmetic, comparison and equality operators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub left: Expr,
    pub op: Token,
    pub right: Expr,
}

impl Located for BinaryExpr {
    fn location(&self) -> &Token {
        &self.op
    }
}

/// `and` / `or`. Kept distinct from `Binary` because it short-circuits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogicalExpr {
    pub left: Expr,
    pub op: LogicalOp,
    pub op_token: Token,
    pub right: Expr,
}

impl Located for LogicalExpr {
    fn location(&self) -> &Token {
        &self.op_token
    }
}

/// A bare name reference, resolved dynamically against the environment
/// chain at evaluation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableExpr {
    pub name: Token,
}

impl Located for VariableExpr {
    fn location(&self) -> &Token {
        &self.name
    }
}

/// `name = value`, itself an expression yielding the assigned value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignExpr {
    pub name: Token,
    pub value: Expr,
}

impl Located for AssignExpr {
    fn location(&self) -> &Token {
        &self.name
    }
}

/// `callee(arguments...)`. `paren` is retained solely to locate runtime
/// errors (arity mismatch, non-callable target) at the call site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallExpr {
    pub callee: Expr,
    pub paren: Token,
    pub arguments: Vec<Expr>,
}

impl Located for CallExpr {
    fn location(&self) -> &Token {
        &self.paren
    }
}
