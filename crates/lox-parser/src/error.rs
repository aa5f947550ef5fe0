use thiserror::Error;

/// A syntax error detected while parsing a token stream.
///
/// Carried only as far as the nearest `synchronize` point: the parser
/// reports the error to the [`lox_diagnostics::Reporter`] at the moment it
/// is raised and uses the `Result` solely to unwind the current
/// declaration, not to communicate the error to callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("invalid assignment target")]
    InvalidAssignmentTarget,

    #[error("can't have more than 255 {what}")]
    TooMany { what: &'static str },
}

pub type ParseResult<T> = Result<T, ParseError>;
