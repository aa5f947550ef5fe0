//! Interactive read-eval-print loop: reads one line at a time, executes
//! it immediately, and persists input history across invocations.

use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use lox_diagnostics::{ConsoleReporter, Reporter};
use lox_interpreter::Interpreter;
use lox_lexer::scan_tokens;
use lox_parser::parse;

use crate::pretty::PrettyReporter;

const EXIT_CODE_COMPILE_ERROR: i32 = 65;

pub fn run(max_call_depth: usize, pretty: bool) -> i32 {
    println!("lox REPL. Ctrl+D to exit.");

    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("failed to initialize readline: {err}");
            return 1;
        }
    };

    let history_file = history_path();
    if let Some(parent) = history_file.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = rl.load_history(&history_file);

    let mut interpreter = Interpreter::with_max_call_depth(max_call_depth);
    let mut exit_code = 0;

    loop {
        match rl.readline("lox> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if run_line(line, &mut interpreter, pretty) {
                    exit_code = EXIT_CODE_COMPILE_ERROR;
                }
                // A runtime error does not end the REPL session (see
                // lox_interpreter::Interpreter::interpret's doc comment);
                // it only affects the exit code for the last line if the
                // process is torn down right after, which a REPL never is.
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("readline error: {err}");
                break;
            }
        }
    }

    let _ = rl.save_history(&history_file);
    exit_code
}

/// Runs one line of input against `interpreter`. Returns `true` if the
/// line failed to compile (so the REPL can remember to exit non-zero).
fn run_line(line: &str, interpreter: &mut Interpreter, pretty: bool) -> bool {
    let mut console = ConsoleReporter::new();
    let mut pretty_reporter;
    let reporter: &mut dyn Reporter = if pretty {
        pretty_reporter = PrettyReporter::new(line, "<repl>");
        &mut pretty_reporter
    } else {
        &mut console
    };

    let tokens = scan_tokens(line, reporter);
    let statements = parse(&tokens, reporter);
    if reporter.had_error() {
        return true;
    }

    interpreter.interpret(&statements, reporter);
    false
}

fn history_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("lox").join("history"))
        .unwrap_or_else(|| PathBuf::from(".lox_history"))
}
