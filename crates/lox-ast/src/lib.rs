//! Abstract syntax tree for lox.
//!
//! One struct per grammar production, each carrying the source [`Token`]s it
//! was built from so the parser and evaluator can both report errors at the
//! right line without re-deriving position information. Dispatch over
//! `Expr`/`Stmt` is plain exhaustive `match` rather than the visitor pattern
//! the original used — the compiler's exhaustiveness check gives the same
//! "a new variant must be handled everywhere" guarantee.

mod expr;
mod literal;
mod stmt;

pub use expr::{
    AssignExpr, BinaryExpr, CallExpr, Expr, GroupingExpr, LogicalExpr, LogicalOp, UnaryExpr,
    VariableExpr,
};
pub use literal::LiteralValue;
pub use stmt::{
    BlockStmt, ExpressionStmt, FunctionStmt, IfStmt, PrintStmt, ReturnStmt, Stmt, VarStmt,
    WhileStmt,
};

use lox_lexer::Token;

/// Common accessor for the token that best locates an AST node for
/// diagnostics (an operator, a keyword, or a name, depending on the node).
pub trait Located {
    fn location(&self) -> &Token;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_value_round_trips_through_serde_json() {
        for value in [
            LiteralValue::Number(3.5),
            LiteralValue::String("hi".to_string()),
            LiteralValue::Boolean(true),
            LiteralValue::Nil,
        ] {
            let json = serde_json::to_string(&value).unwrap();
            let back: LiteralValue = serde_json::from_str(&json).unwrap();
            assert_eq!(value, back);
        }
    }
}
