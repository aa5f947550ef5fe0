//! Tree-walking evaluator for lox.
//!
//! Walks a statement list against the environment chain, producing side
//! effects (`print`) and detecting runtime errors. `return` and runtime
//! errors both travel out through [`Signal`]; the only two places that
//! care which one it is are [`Interpreter::interpret`] (catches `Error`,
//! reports it, stops) and [`LoxFunction::call`](crate::callable::LoxFunction::call)
//! (catches `Return`, yields its value).

use std::io::{self, Write};
use std::rc::Rc;

use lox_ast::{
    BinaryExpr, BlockStmt, CallExpr, Expr, ExpressionStmt, FunctionStmt, GroupingExpr, IfStmt,
    Located, LiteralValue, LogicalExpr, LogicalOp, PrintStmt, ReturnStmt, Stmt, UnaryExpr,
    VarStmt, VariableExpr, WhileStmt,
};
use lox_diagnostics::Reporter;
use lox_lexer::TokenKind;

use crate::callable::{LoxFunction, NativeClock};
use crate::environment::{Env, Environment};
use crate::error::RuntimeError;
use crate::signal::{EvalResult, Signal};
use crate::value::Value;

/// The default recursion guard: the original has none (the host call
/// stack is the only limit), but a tree-walker backed by Rust's own call
/// stack needs one or unbounded language-level recursion crashes the
/// process instead of surfacing a catchable `RuntimeError`.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

/// Owns the current "active" frame and the call-depth counter backing the
/// recursion guard. One `Interpreter` can service many top-level
/// `interpret` calls (e.g. successive REPL lines), so a runtime error on
/// one call does not poison later calls. `environment` starts out — and,
/// between top-level statements, always returns to — the global frame;
/// block entry and function calls swap it out and unconditionally restore
/// it on every exit path (see `execute_block`).
pub struct Interpreter {
    environment: Env,
    call_depth: usize,
    max_call_depth: usize,
    out: Box<dyn Write>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_max_call_depth(DEFAULT_MAX_CALL_DEPTH)
    }

    pub fn with_max_call_depth(max_call_depth: usize) -> Self {
        Self::build(max_call_depth, Box::new(io::stdout()))
    }

    /// Builds an interpreter that writes `print` output to `out` instead
    /// of the process's standard output; used by tests that need to
    /// assert on printed text.
    pub fn with_output(max_call_depth: usize, out: Box<dyn Write>) -> Self {
        Self::build(max_call_depth, out)
    }

    fn build(max_call_depth: usize, out: Box<dyn Write>) -> Self {
        let globals = Environment::global();
        globals
            .borrow_mut()
            .define("clock", Value::Callable(Rc::new(NativeClock)));
        Self {
            environment: globals,
            call_depth: 0,
            max_call_depth,
            out,
        }
    }

    /// Executes `statements` in order. Stops and reports at the first
    /// runtime error; a `return` reaching the top level (no enclosing
    /// call) simply ends the run successfully, since there is no call
    /// site waiting for the value.
    pub fn interpret(&mut self, statements: &[Stmt], reporter: &mut dyn Reporter) {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {}
                Err(Signal::Return(_)) => return,
                Err(Signal::Error(err)) => {
                    tracing::debug!(line = err.line(), "runtime error, aborting interpret call");
                    reporter.runtime_error(err.line(), &err.to_string());
                    return;
                }
            }
        }
    }

    fn execute(&mut self, stmt: &Stmt) -> EvalResult<()> {
        match stmt {
            Stmt::Expression(ExpressionStmt { expr }) => {
                self.evaluate(expr)?;
                Ok(())
            }
            Stmt::Print(PrintStmt { expr }) => {
                let value = self.evaluate(expr)?;
                let _ = writeln!(self.out, "{}", value.stringify());
                Ok(())
            }
            Stmt::Var(VarStmt { name, initializer }) => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                self.environment.borrow_mut().define(name.lexeme.clone(), value);
                Ok(())
            }
            Stmt::Block(BlockStmt { statements }) => {
                let frame = Environment::child(&self.environment);
                self.execute_block(statements, frame)
            }
            Stmt::If(if_stmt) => self.execute_if(if_stmt),
            Stmt::While(while_stmt) => self.execute_while(while_stmt),
            Stmt::Function(declaration) => {
                self.define_function(declaration);
                Ok(())
            }
            Stmt::Return(ReturnStmt { value, .. }) => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                Err(Signal::Return(value))
            }
        }
    }

    fn execute_if(&mut self, if_stmt: &IfStmt) -> EvalResult<()> {
        if self.evaluate(&if_stmt.condition)?.is_truthy() {
            self.execute(&if_stmt.then_branch)
        } else if let Some(else_branch) = &if_stmt.else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn execute_while(&mut self, while_stmt: &WhileStmt) -> EvalResult<()> {
        while self.evaluate(&while_stmt.condition)?.is_truthy() {
            self.execute(&while_stmt.body)?;
        }
        Ok(())
    }

    fn define_function(&mut self, declaration: &Rc<FunctionStmt>) {
        let name = declaration.name.lexeme.clone();
        let function = LoxFunction::new(Rc::clone(declaration), Rc::clone(&self.environment));
        self.environment
            .borrow_mut()
            .define(name, Value::Callable(Rc::new(function)));
    }

    /// Runs `statements` with `environment` as the active frame, then
    /// unconditionally restores whatever frame was active before this
    /// call — on a normal finish, a runtime error, or a `return` unwind
    /// alike. This is the save/restore discipline block entry and
    /// function calls both depend on.
    pub(crate) fn execute_block(&mut self, statements: &[Stmt], environment: Env) -> EvalResult<()> {
        let previous = std::mem::replace(&mut self.environment, environment);
        let result = statements.iter().try_for_each(|stmt| self.execute(stmt));
        self.environment = previous;
        result
    }

    fn evaluate(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal(value) => Ok(literal_to_value(value)),
            Expr::Grouping(GroupingExpr { inner }) => self.evaluate(inner),
            Expr::Unary(unary) => self.evaluate_unary(unary),
            Expr::Binary(binary) => self.evaluate_binary(binary),
            Expr::Logical(logical) => self.evaluate_logical(logical),
            Expr::Variable(VariableExpr { name }) => self
                .environment
                .borrow()
                .get(&name.lexeme, name.line)
                .map_err(Signal::Error),
            Expr::Assign(assign) => self.evaluate_assign(assign),
            Expr::Call(call) => self.evaluate_call(call),
        }
    }

    fn evaluate_unary(&mut self, unary: &UnaryExpr) -> EvalResult<Value> {
        let operand = self.evaluate(&unary.operand)?;
        match unary.op.kind {
            TokenKind::Minus => match operand {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(Signal::Error(RuntimeError::OperandMustBeNumber {
                    line: unary.op.line,
                })),
            },
            TokenKind::Bang => Ok(Value::Boolean(!operand.is_truthy())),
            _ => unreachable!("parser only produces Bang/Minus unary operators"),
        }
    }

    fn evaluate_binary(&mut self, binary: &BinaryExpr) -> EvalResult<Value> {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;
        let line = binary.op.line;

        match binary.op.kind {
            TokenKind::Minus => numeric_op(left, right, line, |a, b| a - b),
            TokenKind::Slash => numeric_op(left, right, line, |a, b| a / b),
            TokenKind::Star => numeric_op(left, right, line, |a, b| a * b),
            TokenKind::Plus => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
                _ => Err(Signal::Error(RuntimeError::OperandsMustBeNumbersOrStrings { line })),
            },
            TokenKind::Greater => numeric_cmp(left, right, line, |a, b| a > b),
            TokenKind::GreaterEqual => numeric_cmp(left, right, line, |a, b| a >= b),
            TokenKind::Less => numeric_cmp(left, right, line, |a, b| a < b),
            TokenKind::LessEqual => numeric_cmp(left, right, line, |a, b| a <= b),
            TokenKind::EqualEqual => Ok(Value::Boolean(left == right)),
            TokenKind::BangEqual => Ok(Value::Boolean(left != right)),
            _ => unreachable!("parser only produces arithmetic/comparison/equality operators here"),
        }
    }

    fn evaluate_logical(&mut self, logical: &LogicalExpr) -> EvalResult<Value> {
        let left = self.evaluate(&logical.left)?;
        match logical.op {
            LogicalOp::Or if left.is_truthy() => Ok(left),
            LogicalOp::Or => self.evaluate(&logical.right),
            LogicalOp::And if !left.is_truthy() => Ok(left),
            LogicalOp::And => self.evaluate(&logical.right),
        }
    }

    fn evaluate_assign(&mut self, assign: &lox_ast::AssignExpr) -> EvalResult<Value> {
        let value = self.evaluate(&assign.value)?;
        self.environment
            .borrow_mut()
            .assign(&assign.name.lexeme, value.clone(), assign.name.line)?;
        Ok(value)
    }

    fn evaluate_call(&mut self, call: &CallExpr) -> EvalResult<Value> {
        let callee = self.evaluate(&call.callee)?;
        let line = call.location().line;
        let Value::Callable(callable) = callee else {
            return Err(Signal::Error(RuntimeError::NotCallable { line }));
        };

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for arg in &call.arguments {
            arguments.push(self.evaluate(arg)?);
        }

        if arguments.len() != callable.arity() {
            return Err(Signal::Error(RuntimeError::ArityMismatch {
                expected: callable.arity(),
                got: arguments.len(),
                line,
            }));
        }

        if self.call_depth >= self.max_call_depth {
            return Err(Signal::Error(RuntimeError::StackOverflow { line }));
        }

        tracing::trace!(callee = callable.name(), args = arguments.len(), "calling");
        self.call_depth += 1;
        let result = callable.call(self, arguments);
        self.call_depth -= 1;
        result
    }
}

fn literal_to_value(value: &LiteralValue) -> Value {
    match value {
        LiteralValue::Number(n) => Value::Number(*n),
        LiteralValue::String(s) => Value::String(s.clone()),
        LiteralValue::Boolean(b) => Value::Boolean(*b),
        LiteralValue::Nil => Value::Nil,
    }
}

fn numeric_op(
    left: Value,
    right: Value,
    line: usize,
    op: impl FnOnce(f64, f64) -> f64,
) -> EvalResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(op(a, b))),
        _ => Err(Signal::Error(RuntimeError::OperandsMustBeNumbers { line })),
    }
}

fn numeric_cmp(
    left: Value,
    right: Value,
    line: usize,
    op: impl FnOnce(f64, f64) -> bool,
) -> EvalResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Boolean(op(a, b))),
        _ => Err(Signal::Error(RuntimeError::OperandsMustBeNumbers { line })),
    }
}
