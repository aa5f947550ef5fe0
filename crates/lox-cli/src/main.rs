//! Command-line driver for lox.
//!
//! Wires the scanner, parser and evaluator together: with a script
//! argument, read and run the file once; with none, start an interactive
//! REPL. This binary is the "external driver" the core interpreter spec
//! explicitly calls out of scope for the scanner/parser/evaluator crates
//! themselves — it owns process exit codes, the diagnostic sink's
//! concrete implementation, and the logging setup.

mod pretty;
mod repl;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use lox_diagnostics::{ConsoleReporter, Reporter};
use lox_interpreter::{Interpreter, DEFAULT_MAX_CALL_DEPTH};
use lox_lexer::scan_tokens;
use lox_parser::parse;

use crate::pretty::PrettyReporter;

const EXIT_OK: u8 = 0;
const EXIT_COMPILE_ERROR: u8 = 65;
const EXIT_RUNTIME_ERROR: u8 = 70;
const EXIT_USAGE_ERROR: u8 = 74;

/// A tree-walking interpreter for lox.
#[derive(Parser)]
#[command(name = "lox", version, about = "A tree-walking interpreter for lox", long_about = None)]
struct Cli {
    /// Script to run. Omit to start an interactive REPL.
    script: Option<PathBuf>,

    /// Render diagnostics with source-pointing output instead of plain text.
    #[arg(long)]
    pretty: bool,

    /// Overrides the recursion guard's call-depth limit.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::try_init().ok();
    let cli = Cli::parse();

    let code = match &cli.script {
        Some(path) => run_file(path, cli.max_call_depth, cli.pretty),
        None => repl::run(cli.max_call_depth, cli.pretty),
    };

    ExitCode::from(code as u8)
}

fn run_file(path: &PathBuf, max_call_depth: usize, pretty: bool) -> i32 {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("lox: can't read {}: {err}", path.display());
            return EXIT_USAGE_ERROR as i32;
        }
    };

    let mut console;
    let mut pretty_reporter;
    let reporter: &mut dyn Reporter = if pretty {
        pretty_reporter = PrettyReporter::new(&source, path.display().to_string());
        &mut pretty_reporter
    } else {
        console = ConsoleReporter::new();
        &mut console
    };

    tracing::debug!(file = %path.display(), "scanning");
    let tokens = scan_tokens(&source, reporter);

    tracing::debug!(tokens = tokens.len(), "parsing");
    let statements = parse(&tokens, reporter);

    if reporter.had_error() {
        return EXIT_COMPILE_ERROR as i32;
    }

    tracing::debug!(statements = statements.len(), "interpreting");
    let mut interpreter = Interpreter::with_max_call_depth(max_call_depth);
    interpreter.interpret(&statements, reporter);

    if reporter.had_runtime_error() {
        return EXIT_RUNTIME_ERROR as i32;
    }

    EXIT_OK as i32
}
