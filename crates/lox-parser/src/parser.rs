use lox_ast::{
    AssignExpr, BinaryExpr, BlockStmt, CallExpr, Expr, ExpressionStmt, FunctionStmt, GroupingExpr,
    IfStmt, LiteralValue, LogicalExpr, LogicalOp, PrintStmt, ReturnStmt, Stmt, UnaryExpr,
    VarStmt, VariableExpr, WhileStmt,
};
use lox_diagnostics::{Location, Reporter};
use lox_lexer::{Literal, Token, TokenKind};
use std::rc::Rc;

use crate::error::{ParseError, ParseResult};

const MAX_ARGUMENTS: usize = 255;

/// Recursive-descent parser over an already-scanned token slice.
///
/// Each grammar nonterminal in the module doc's EBNF is one method here.
/// A failed declaration is reported through `reporter` and dropped from
/// the output list rather than represented as a null/placeholder node.
pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
    reporter: &'a mut dyn Reporter,
}

/// Parses a complete program, reporting every syntax error it recovers
/// from and returning only the statements that parsed successfully.
pub fn parse(tokens: &[Token], reporter: &mut dyn Reporter) -> Vec<Stmt> {
    let mut parser = Parser {
        tokens,
        current: 0,
        reporter,
    };
    let mut statements = Vec::new();
    while !parser.is_at_end() {
        if let Some(stmt) = parser.declaration() {
            statements.push(stmt);
        }
    }
    statements
}

impl<'a> Parser<'a> {
    // ---- declarations ----------------------------------------------

    fn declaration(&mut self) -> Option<Stmt> {
        let result = if self.match_any(&[TokenKind::Fun]) {
            self.function("function")
        } else if self.match_any(&[TokenKind::Var]) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(_) => {
                self.synchronize();
                None
            }
        }
    }

    fn function(&mut self, kind: &str) -> ParseResult<Stmt> {
        let name = self
            .consume(TokenKind::Identifier, &format!("expect {kind} name."))?
            .clone();
        self.consume(
            TokenKind::LeftParen,
            &format!("expect '(' after {kind} name."),
        )?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if params.len() >= MAX_ARGUMENTS {
                    let tok = self.peek().clone();
                    self.error_too_many(&tok, "parameters");
                }
                params.push(
                    self.consume(TokenKind::Identifier, "expect parameter name.")?
                        .clone(),
                );
                if !self.match_any(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "expect ')' after parameters.")?;

        self.consume(
            TokenKind::LeftBrace,
            &format!("expect '{{' before {kind} body."),
        )?;
        let body = self.block()?;

        Ok(Stmt::Function(Rc::new(FunctionStmt { name, params, body })))
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self
            .consume(TokenKind::Identifier, "expect variable name.")?
            .clone();
        let initializer = if self.match_any(&[TokenKind::Equal]) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "expect ';' after variable declaration.")?;
        Ok(Stmt::Var(VarStmt { name, initializer }))
    }

    // ---- statements --------------------------------------------------

    fn statement(&mut self) -> ParseResult<Stmt> {
        if self.match_any(&[TokenKind::For]) {
            return self.for_statement();
        }
        if self.match_any(&[TokenKind::If]) {
            return self.if_statement();
        }
        if self.match_any(&[TokenKind::Print]) {
            return self.print_statement();
        }
        if self.match_any(&[TokenKind::Return]) {
            return self.return_statement();
        }
        if self.match_any(&[TokenKind::While]) {
            return self.while_statement();
        }
        if self.match_any(&[TokenKind::LeftBrace]) {
            return Ok(Stmt::Block(BlockStmt {
                statements: self.block()?,
            }));
        }
        self.expression_statement()
    }

    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftParen, "expect '(' after 'for'.")?;

        let initializer = if self.match_any(&[TokenKind::Semicolon]) {
            None
        } else if self.match_any(&[TokenKind::Var]) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if !self.check(TokenKind::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "expect ';' after loop condition.")?;

        let increment = if !self.check(TokenKind::RightParen) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::RightParen, "expect ')' after for clauses.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block(BlockStmt {
                statements: vec![
                    body,
                    Stmt::Expression(ExpressionStmt { expr: increment }),
                ],
            });
        }

        let condition = condition.unwrap_or(Expr::Literal(LiteralValue::Boolean(true)));
        body = Stmt::While(Box::new(WhileStmt { condition, body }));

        if let Some(initializer) = initializer {
            body = Stmt::Block(BlockStmt {
                statements: vec![initializer, body],
            });
        }

        Ok(body)
    }

    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftParen, "expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "expect ')' after if condition.")?;

        let then_branch = self.statement()?;
        let else_branch = if self.match_any(&[TokenKind::Else]) {
            Some(self.statement()?)
        } else {
            None
        };

        Ok(Stmt::If(Box::new(IfStmt {
            condition,
            then_branch,
            else_branch,
        })))
    }

    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "expect ';' after value.")?;
        Ok(Stmt::Print(PrintStmt { expr }))
    }

    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();
        let value = if !self.check(TokenKind::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "expect ';' after return value.")?;
        Ok(Stmt::Return(ReturnStmt { keyword, value }))
    }

    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftParen, "expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "expect ')' after condition.")?;
        let body = self.statement()?;
        Ok(Stmt::While(Box::new(WhileStmt { condition, body })))
    }

    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        self.consume(TokenKind::RightBrace, "expect '}' after block.")?;
        Ok(statements)
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "expect ';' after expression.")?;
        Ok(Stmt::Expression(ExpressionStmt { expr }))
    }

    // ---- expressions ---------------------------------------------------

    fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.or()?;

        if self.match_any(&[TokenKind::Equal]) {
            let equals = self.previous().clone();
            let value = self.assignment()?;

            if let Expr::Variable(VariableExpr { name }) = expr {
                return Ok(Expr::Assign(Box::new(AssignExpr { name, value })));
            }

            self.error_invalid_assignment(&equals);
            return Ok(expr);
        }

        Ok(expr)
    }

    fn or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.and()?;
        while self.match_any(&[TokenKind::Or]) {
            let op_token = self.previous().clone();
            let right = self.and()?;
            expr = Expr::Logical(Box::new(LogicalExpr {
                left: expr,
                op: LogicalOp::Or,
                op_token,
                right,
            }));
        }
        Ok(expr)
    }

    fn and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.equality()?;
        while self.match_any(&[TokenKind::And]) {
            let op_token = self.previous().clone();
            let right = self.equality()?;
            expr = Expr::Logical(Box::new(LogicalExpr {
                left: expr,
                op: LogicalOp::And,
                op_token,
                right,
            }));
        }
        Ok(expr)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;
        while self.match_any(&[TokenKind::BangEqual, TokenKind::EqualEqual]) {
            let op = self.previous().clone();
            let right = self.comparison()?;
            expr = Expr::Binary(Box::new(BinaryExpr {
                left: expr,
                op,
                right,
            }));
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.term()?;
        while self.match_any(&[
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ]) {
            let op = self.previous().clone();
            let right = self.term()?;
            expr = Expr::Binary(Box::new(BinaryExpr {
                left: expr,
                op,
                right,
            }));
        }
        Ok(expr)
    }

    fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.factor()?;
        while self.match_any(&[TokenKind::Minus, TokenKind::Plus]) {
            let op = self.previous().clone();
            let right = self.factor()?;
            expr = Expr::Binary(Box::new(BinaryExpr {
                left: expr,
                op,
                right,
            }));
        }
        Ok(expr)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;
        while self.match_any(&[TokenKind::Slash, TokenKind::Star]) {
            let op = self.previous().clone();
            let right = self.unary()?;
            expr = Expr::Binary(Box::new(BinaryExpr {
                left: expr,
                op,
                right,
            }));
        }
        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        if self.match_any(&[TokenKind::Bang, TokenKind::Minus]) {
            let op = self.previous().clone();
            let operand = self.unary()?;
            return Ok(Expr::Unary(Box::new(UnaryExpr { op, operand })));
        }
        self.call()
    }

    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;
        loop {
            if self.match_any(&[TokenKind::LeftParen]) {
                expr = self.finish_call(expr)?;
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if arguments.len() >= MAX_ARGUMENTS {
                    let tok = self.peek().clone();
                    self.error_too_many(&tok, "arguments");
                }
                arguments.push(self.expression()?);
                if !self.match_any(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        let paren = self
            .consume(TokenKind::RightParen, "expect ')' after arguments.")?
            .clone();
        Ok(Expr::Call(Box::new(CallExpr {
            callee,
            paren,
            arguments,
        })))
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        if self.match_any(&[TokenKind::False]) {
            return Ok(Expr::Literal(LiteralValue::Boolean(false)));
        }
        if self.match_any(&[TokenKind::True]) {
            return Ok(Expr::Literal(LiteralValue::Boolean(true)));
        }
        if self.match_any(&[TokenKind::Nil]) {
            return Ok(Expr::Literal(LiteralValue::Nil));
        }
        if self.match_any(&[TokenKind::Number]) {
            let value = match self.previous().literal {
                Some(Literal::Number(n)) => n,
                _ => unreachable!("Number token without a numeric literal"),
            };
            return Ok(Expr::Literal(LiteralValue::Number(value)));
        }
        if self.match_any(&[TokenKind::StringLit]) {
            let value = match &self.previous().literal {
                Some(Literal::Str(s)) => s.clone(),
                _ => unreachable!("StringLit token without a string literal"),
            };
            return Ok(Expr::Literal(LiteralValue::String(value)));
        }
        if self.match_any(&[TokenKind::Identifier]) {
            return Ok(Expr::Variable(VariableExpr {
                name: self.previous().clone(),
            }));
        }
        if self.match_any(&[TokenKind::LeftParen]) {
            let inner = self.expression()?;
            self.consume(TokenKind::RightParen, "expect ')' after expression.")?;
            return Ok(Expr::Grouping(Box::new(GroupingExpr { inner })));
        }

        let tok = self.peek().clone();
        Err(self.error(&tok, "expect expression."))
    }

    // ---- token stream plumbing -----------------------------------------

    fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        for kind in kinds {
            if self.check(*kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn check(&self, kind: TokenKind) -> bool {
        if self.is_at_end() {
            return kind == TokenKind::Eof;
        }
        self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<&Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        let tok = self.peek().clone();
        Err(self.error(&tok, message))
    }

    fn error(&mut self, token: &Token, message: &str) -> ParseError {
        let location = if token.kind == TokenKind::Eof {
            Location::AtEnd
        } else {
            Location::At(&token.lexeme)
        };
        self.reporter.parse_error(token.line, location, message);
        ParseError::UnexpectedToken {
            expected: message.to_string(),
            found: token.kind.to_string(),
        }
    }

    /// Reports and builds the error for an `=` target that isn't an
    /// assignable place (e.g. `a + b = 1;`).
    fn error_invalid_assignment(&mut self, token: &Token) -> ParseError {
        let location = if token.kind == TokenKind::Eof {
            Location::AtEnd
        } else {
            Location::At(&token.lexeme)
        };
        self.reporter
            .parse_error(token.line, location, "invalid assignment target.");
        ParseError::InvalidAssignmentTarget
    }

    /// Reports and builds the error for a parameter/argument list past the
    /// 255-entry cap (§4.2).
    fn error_too_many(&mut self, token: &Token, what: &'static str) -> ParseError {
        let message = format!("can't have more than 255 {what}.");
        let location = if token.kind == TokenKind::Eof {
            Location::AtEnd
        } else {
            Location::At(&token.lexeme)
        };
        self.reporter.parse_error(token.line, location, &message);
        ParseError::TooMany { what }
    }

    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            match self.peek().kind {
                TokenKind::Class
                | TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}
