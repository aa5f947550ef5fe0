//! Shared diagnostic sink.
//!
//! Every phase of the interpreter (scanner, parser, evaluator) reports problems
//! through the [`Reporter`] trait instead of owning process exit semantics
//! itself. This keeps the core crates free of `std::process::exit` calls and
//! lets a host (a CLI, a REPL, a test harness) decide how diagnostics are
//! rendered and what an exit code should be.

mod reporter;

pub use reporter::{ConsoleReporter, Location, Reporter};
