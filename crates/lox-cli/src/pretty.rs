//! Pretty diagnostic rendering, enabled by `--pretty`.
//!
//! Wraps an [`ariadne`] report around the same information the plain
//! [`lox_diagnostics::ConsoleReporter`] prints, so the exact wire format
//! the interpreter's scenarios are sensitive to stays the default; this is
//! an additional, opt-in rendering, not a replacement.

use ariadne::{Color, Label, Report, ReportKind, Source};
use lox_diagnostics::{Location, Reporter};

/// Renders the same two diagnostic channels as [`lox_diagnostics::ConsoleReporter`]
/// but with `ariadne`'s source-pointing output, underlining the offending
/// line. Still tracks the same sticky "had error" / "had runtime error"
/// flags a driver needs to compute an exit code.
pub struct PrettyReporter<'a> {
    source: &'a str,
    filename: String,
    had_error: bool,
    had_runtime_error: bool,
}

impl<'a> PrettyReporter<'a> {
    pub fn new(source: &'a str, filename: impl Into<String>) -> Self {
        Self {
            source,
            filename: filename.into(),
            had_error: false,
            had_runtime_error: false,
        }
    }

    /// The byte range of 1-based `line` within `self.source`, used as the
    /// label span since the `Reporter` trait only carries a line number,
    /// not the originating token's exact span.
    fn line_span(&self, line: usize) -> std::ops::Range<usize> {
        let mut start = 0;
        for (idx, text) in self.source.split_inclusive('\n').enumerate() {
            let end = start + text.trim_end_matches('\n').len();
            if idx + 1 == line {
                return start..end.max(start);
            }
            start += text.len();
        }
        let len = self.source.len();
        len..len
    }

    fn emit(&self, kind: ReportKind, line: usize, message: &str) {
        let span = self.line_span(line);
        let report = Report::build(kind, (self.filename.clone(), span.clone()))
            .with_message(message)
            .with_label(
                Label::new((self.filename.clone(), span))
                    .with_message(message)
                    .with_color(match kind {
                        ReportKind::Error => Color::Red,
                        _ => Color::Yellow,
                    }),
            )
            .finish();
        let _ = report.eprint((self.filename.clone(), Source::from(self.source)));
    }
}

impl Reporter for PrettyReporter<'_> {
    fn error(&mut self, line: usize, message: &str) {
        self.emit(ReportKind::Error, line, message);
        self.had_error = true;
    }

    fn parse_error(&mut self, line: usize, location: Location<'_>, message: &str) {
        self.emit(ReportKind::Error, line, &format!("{message}{location}"));
        self.had_error = true;
    }

    fn runtime_error(&mut self, line: usize, message: &str) {
        self.emit(ReportKind::Error, line, message);
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
    fn line_span_finds_each_line_by_1_based_number() {
        let source = "var a = 1;\nprint a;\n";
        let reporter = PrettyReporter::new(source, "test");
        assert_eq!(&source[reporter.line_span(1)], "var a = 1;");
        assert_eq!(&source[reporter.line_span(2)], "print a;");
    }

    #[test]
    fn had_error_flags_track_independently() {
        let mut reporter = PrettyReporter::new("1 + 1;", "test");
        assert!(!reporter.had_error());
        reporter.error(1, "bad");
        assert!(reporter.had_error());
        assert!(!reporter.had_runtime_error());
        reporter.reset();
        assert!(!reporter.had_error());
    }
}
