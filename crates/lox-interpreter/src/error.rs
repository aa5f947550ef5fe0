use thiserror::Error;

/// A runtime fault detected while evaluating a statement or expression.
///
/// Every variant carries the line it was detected at so the reporter can
/// format the `"<message>\n[line N]"` wire format without threading a
/// separate location value alongside the error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("Operand must be a number.")]
    OperandMustBeNumber { line: usize },

    #[error("Operands must be numbers.")]
    OperandsMustBeNumbers { line: usize },

    #[error("Operands must be two numbers or two strings.")]
    OperandsMustBeNumbersOrStrings { line: usize },

    #[error("Undefined variable '{name}'.")]
    UndefinedVariable { name: String, line: usize },

    #[error("Can only call functions and classes.")]
    NotCallable { line: usize },

    #[error("Expected {expected} arguments but got {got}.")]
    ArityMismatch {
        expected: usize,
        got: usize,
        line: usize,
    },

    #[error("Stack overflow.")]
    StackOverflow { line: usize },
}

impl RuntimeError {
    pub fn line(&self) -> usize {
        match self {
            RuntimeError::OperandMustBeNumber { line }
            | RuntimeError::OperandsMustBeNumbers { line }
            | RuntimeError::OperandsMustBeNumbersOrStrings { line }
            | RuntimeError::UndefinedVariable { line, .. }
            | RuntimeError::NotCallable { line }
            | RuntimeError::ArityMismatch { line, .. }
            | RuntimeError::StackOverflow { line } => *line,
        }
    }
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
