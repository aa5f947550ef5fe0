//! Scanner for lox.
//!
//! Converts source text into a stream of [`Token`]s terminated by exactly
//! one `EOF` token. Malformed input is reported through a
//! [`lox_diagnostics::Reporter`] rather than raised as a `Result`; scanning
//! always completes.

mod lexer;
mod token;

pub use lexer::scan_tokens;
pub use token::{LexErrorKind, Literal, Span, Token, TokenKind};
