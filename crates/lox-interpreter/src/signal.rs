use crate::error::RuntimeError;
use crate::value::Value;

/// The internal control-flow event threaded through the evaluator's
/// `Result` type.
///
/// A `return` statement and a runtime error both need to unwind past
/// intervening block statements without being confused for one another:
/// `Return` is caught at `Callable::call`'s call boundary and never
/// reported; `Error` is caught at `Interpreter::interpret`'s top-level
/// boundary and reported through the `Reporter`.
#[derive(Debug, Clone)]
pub enum Signal {
    Return(Value),
    Error(RuntimeError),
}

impl From<RuntimeError> for Signal {
    fn from(err: RuntimeError) -> Self {
        Signal::Error(err)
    }
}

pub type EvalResult<T> = Result<T, Signal>;
