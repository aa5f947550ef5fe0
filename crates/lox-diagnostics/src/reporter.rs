use std::fmt;

/// Where in a token stream a compile error was detected.
///
/// Kept decoupled from the lexer's `Token` type so this crate stays a leaf
/// dependency that the lexer, parser and evaluator can all sit on top of.
#[derive(Debug, Clone, Copy)]
pub enum Location<'a> {
    /// The error was detected at end of input.
    AtEnd,
    /// The error was detected at the given lexeme.
    At(&'a str),
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::AtEnd => write!(f, " at end"),
            Location::At(lexeme) => write!(f, " at '{lexeme}'"),
        }
    }
}

/// The sink every phase reports diagnostics through.
///
/// `error`/`parse_error` cover the scanner and parser ("compile errors" in
/// the original terminology); `runtime_error` covers the evaluator. Both
/// kinds set a sticky flag so a driver can derive an exit code without
/// threading a `Result` through every statement.
pub trait Reporter {
    /// A scanner or parser error with no specific token to blame, e.g. an
    /// unterminated string or an unexpected character.
    fn error(&mut self, line: usize, message: &str);

    /// A parser error located at a specific token (or end of input).
    fn parse_error(&mut self, line: usize, location: Location<'_>, message: &str);

    /// A runtime error raised during evaluation.
    fn runtime_error(&mut self, line: usize, message: &str);

    /// Whether any lexical or parse error has been reported.
    fn had_error(&self) -> bool;

    /// Whether any runtime error has been reported.
    fn had_runtime_error(&self) -> bool;

    /// Clears both sticky flags, e.g. between REPL lines.
    fn reset(&mut self);
}

/// The default `Reporter`: plain line-oriented text to stderr, in the exact
/// wire format the testable scenarios are written against.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    had_error: bool,
    had_runtime_error: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for ConsoleReporter {
    fn error(&mut self, line: usize, message: &str) {
        eprintln!("[line {line}] Error: {message}");
        self.had_error = true;
    }

    fn parse_error(&mut self, line: usize, location: Location<'_>, message: &str) {
        eprintln!("[line {line}] Error{location}: {message}");
        self.had_error = true;
    }

    fn runtime_error(&mut self, line: usize, message: &str) {
        eprintln!("{message}\n[line {line}]");
        self.had_runtime_error = true;
    }

    fn had_error(&self) -> bool {
        self.had_error
    }

    fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_reporter_has_no_errors() {
        let reporter = ConsoleReporter::new();
        assert!(!reporter.had_error());
        assert!(!reporter.had_runtime_error());
    }

    #[test]
    fn error_sets_had_error() {
        let mut reporter = ConsoleReporter::new();
        reporter.error(3, "Unexpected character.");
        assert!(reporter.had_error());
        assert!(!reporter.had_runtime_error());
    }

    #[test]
    fn runtime_error_sets_had_runtime_error_only() {
        let mut reporter = ConsoleReporter::new();
        reporter.runtime_error(7, "Undefined variable 'a'.");
        assert!(reporter.had_runtime_error());
        assert!(!reporter.had_error());
    }

    #[test]
    fn reset_clears_both_flags() {
        let mut reporter = ConsoleReporter::new();
        reporter.error(1, "x");
        reporter.runtime_error(2, "y");
        reporter.reset();
        assert!(!reporter.had_error());
        assert!(!reporter.had_runtime_error());
    }

    #[test]
    fn location_display_matches_wire_format() {
        assert_eq!(Location::AtEnd.to_string(), " at end");
        assert_eq!(Location::At("foo").to_string(), " at 'foo'");
    }
}
