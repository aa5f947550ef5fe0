use std::rc::Rc;

use serde::{Deserialize, Serialize};

use lox_lexer::Token;

use crate::{Expr, Located};

/// All statement forms in lox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Stmt {
    Expression(ExpressionStmt),
    Print(PrintStmt),
    Var(VarStmt),
    Block(BlockStmt),
    If(Box<IfStmt>),
    While(Box<WhileStmt>),
    Function(Rc<FunctionStmt>),
    Return(ReturnStmt),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionStmt {
    pub expr: Expr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintStmt {
    pub expr: Expr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarStmt {
    pub name: Token,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockStmt {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Stmt,
    pub else_branch: Option<Stmt>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Stmt,
}

/// A function declaration. Wrapped in `Rc` because a live `Callable` holds
/// a shared reference to it for as long as the closure is reachable, well
/// past the lexical block that declared it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionStmt {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnStmt {
    pub keyword: Token,
    pub value: Option<Expr>,
}

impl Located for ReturnStmt {
    fn location(&self) -> &Token {
        &self.keyword
    }
}
