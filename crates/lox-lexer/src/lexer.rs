//! Drives the `logos` automaton to produce a complete token stream.

use logos::Logos;

use lox_diagnostics::Reporter;

use crate::token::{LexErrorKind, Literal, Span, Token, TokenKind};

/// Scans `source` into a token stream terminated by exactly one `EOF` token.
///
/// Never fails outright: an unrecognized character or an unterminated
/// string is reported through `reporter` and scanning resumes at the next
/// character, matching the original scanner's best-effort contract.
pub fn scan_tokens(source: &str, reporter: &mut dyn Reporter) -> Vec<Token> {
    let mut lex = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lex.next() {
        let span = lex.span();
        let text = lex.slice();
        let line = lex.extras.line;

        match result {
            Ok(TokenKind::Newline) => {
                // Consumed by the callback; never reaches here, kept for
                // exhaustiveness against future Newline-producing rules.
            }
            Ok(kind) => {
                let literal = literal_for(kind, text);
                tokens.push(Token::new(kind, text, literal, line, Span::new(span.start, span.end)));
            }
            Err(LexErrorKind::UnterminatedString) => {
                reporter.error(line, "Unterminated string.");
            }
            Err(LexErrorKind::UnexpectedCharacter) => {
                reporter.error(line, "Unexpected character.");
            }
        }
    }

    let eof_line = lex.extras.line;
    tokens.push(Token::eof(eof_line, source.len()));
    tokens
}

fn literal_for(kind: TokenKind, text: &str) -> Option<Literal> {
    match kind {
        TokenKind::Number => text.parse::<f64>().ok().map(Literal::Number),
        TokenKind::StringLit => {
            // Strip the surrounding quotes; no escape processing.
            let inner = &text[1..text.len() - 1];
            Some(Literal::Str(inner.to_string()))
        }
        _ => None,
    }
}
