//! Token definitions for lox.
//!
//! `TokenKind` is a [`logos`]-derived automaton: the one/two-char operator
//! disambiguation (`!` vs `!=`, etc.), keyword-vs-identifier resolution, and
//! number matching all fall out of logos's maximal-munch DFA for free.
//! String literals need a lookahead logos's pure regex matching can't report
//! an error path for ("no closing quote before EOF"), so `StringLit` is
//! driven by the [`scan_string`] callback instead of a regex.

use logos::{Lexer, Logos, Skip};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A byte-offset range into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Per-run scanner state threaded through logos's callbacks.
///
/// Line numbers are 1-based (see DESIGN.md on the original's 0-based quirk).
#[derive(Debug, Clone)]
pub struct LineTracker {
    pub line: usize,
}

impl Default for LineTracker {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// Why the scanner could not classify a span of source text.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    #[default]
    #[error("unexpected character")]
    UnexpectedCharacter,
    #[error("unterminated string")]
    UnterminatedString,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[logos(error = LexErrorKind)]
#[logos(extras = LineTracker)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"//[^\n]*")]
pub enum TokenKind {
    // Single-character punctuation.
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token(";")]
    Semicolon,
    #[token("*")]
    Star,

    // One-or-two character operators; logos prefers the longer match.
    #[token("!=")]
    BangEqual,
    #[token("!")]
    Bang,
    #[token("==")]
    EqualEqual,
    #[token("=")]
    Equal,
    #[token(">=")]
    GreaterEqual,
    #[token(">")]
    Greater,
    #[token("<=")]
    LessEqual,
    #[token("<")]
    Less,

    #[token("/")]
    Slash,

    #[regex(r"\n", count_newline)]
    Newline,

    // Literals.
    #[token("\"", scan_string)]
    StringLit,
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    // Keywords. Exact-token rules outrank the identifier regex above.
    #[token("and")]
    And,
    #[token("class")]
    Class,
    #[token("else")]
    Else,
    #[token("false")]
    False,
    #[token("fun")]
    Fun,
    #[token("for")]
    For,
    #[token("if")]
    If,
    #[token("nil")]
    Nil,
    #[token("or")]
    Or,
    #[token("print")]
    Print,
    #[token("return")]
    Return,
    #[token("super")]
    Super,
    #[token("this")]
    This,
    #[token("true")]
    True,
    #[token("var")]
    Var,
    #[token("while")]
    While,

    /// Never produced by the lexer itself; appended once by the driver.
    Eof,
}

fn count_newline(lex: &mut Lexer<TokenKind>) -> Skip {
    lex.extras.line += 1;
    Skip
}

/// Scans the string body (no escape processing) starting just past the
/// opening quote. Reports [`LexErrorKind::UnterminatedString`] when no
/// closing quote exists before EOF, consuming the rest of the input so the
/// scanner does not re-tokenize the dangling string body as code.
fn scan_string(lex: &mut Lexer<TokenKind>) -> Result<(), LexErrorKind> {
    let remainder = lex.remainder();
    match remainder.find('"') {
        Some(end) => {
            lex.extras.line += remainder[..end].matches('\n').count();
            lex.bump(end + 1);
            Ok(())
        }
        None => {
            lex.extras.line += remainder.matches('\n').count();
            lex.bump(remainder.len());
            Err(LexErrorKind::UnterminatedString)
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Minus => "-",
            TokenKind::Plus => "+",
            TokenKind::Semicolon => ";",
            TokenKind::Star => "*",
            TokenKind::BangEqual => "!=",
            TokenKind::Bang => "!",
            TokenKind::EqualEqual => "==",
            TokenKind::Equal => "=",
            TokenKind::GreaterEqual => ">=",
            TokenKind::Greater => ">",
            TokenKind::LessEqual => "<=",
            TokenKind::Less => "<",
            TokenKind::Slash => "/",
            TokenKind::Newline => "newline",
            TokenKind::StringLit => "string",
            TokenKind::Number => "number",
            TokenKind::Identifier => "identifier",
            TokenKind::And => "and",
            TokenKind::Class => "class",
            TokenKind::Else => "else",
            TokenKind::False => "false",
            TokenKind::Fun => "fun",
            TokenKind::For => "for",
            TokenKind::If => "if",
            TokenKind::Nil => "nil",
            TokenKind::Or => "or",
            TokenKind::Print => "print",
            TokenKind::Return => "return",
            TokenKind::Super => "super",
            TokenKind::This => "this",
            TokenKind::True => "true",
            TokenKind::Var => "var",
            TokenKind::While => "while",
            TokenKind::Eof => "end of file",
        };
        write!(f, "{name}")
    }
}

/// A literal value carried by a `NUMBER` or `STRING` token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Number(f64),
    Str(String),
}

/// A scanned token: its kind, the exact source substring, an optional
/// literal value, and the 1-based line it started on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: usize,
    pub span: Span,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        literal: Option<Literal>,
        line: usize,
        span: Span,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal,
            line,
            span,
        }
    }

    pub fn eof(line: usize, pos: usize) -> Self {
        Self::new(TokenKind::Eof, "", None, line, Span::new(pos, pos))
    }
}
