use std::fmt;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use lox_ast::FunctionStmt;

use crate::environment::{Env, Environment};
use crate::interpreter::Interpreter;
use crate::signal::Signal;
use crate::value::{Callable, Value};

/// A user-defined `fun` declaration together with the environment it
/// closed over at the point it was declared.
///
/// Capturing `closure` here — rather than reading whatever the
/// interpreter's "current" environment happens to be at call time — is
/// what makes the function see the bindings that were in scope where it
/// was written, not where it happens to be invoked from.
pub struct LoxFunction {
    declaration: Rc<FunctionStmt>,
    closure: Env,
}

impl LoxFunction {
    pub fn new(declaration: Rc<FunctionStmt>, closure: Env) -> Self {
        Self {
            declaration,
            closure,
        }
    }
}

impl fmt::Debug for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LoxFunction({})", self.declaration.name.lexeme)
    }
}

impl Callable for LoxFunction {
    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }

    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value, Signal> {
        let frame = Environment::child(&self.closure);
        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            frame.borrow_mut().define(param.lexeme.clone(), argument);
        }

        match interpreter.execute_block(&self.declaration.body, frame) {
            Ok(()) => Ok(Value::Nil),
            Err(Signal::Return(value)) => Ok(value),
            Err(err @ Signal::Error(_)) => Err(err),
        }
    }
}

/// The native `clock()` function installed in the global frame: arity
/// zero, returns the wall-clock time in seconds as a double.
#[derive(Debug)]
pub struct NativeClock;

impl Callable for NativeClock {
    fn arity(&self) -> usize {
        0
    }

    fn name(&self) -> &str {
        "clock"
    }

    fn call(&self, _interpreter: &mut Interpreter, _arguments: Vec<Value>) -> Result<Value, Signal> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Ok(Value::Number(now.as_secs_f64()))
    }
}
