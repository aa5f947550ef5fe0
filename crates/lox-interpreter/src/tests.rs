use lox_diagnostics::{ConsoleReporter, Reporter};
use lox_lexer::scan_tokens;
use lox_parser::parse;
use pretty_assertions::assert_eq;

use crate::Interpreter;

/// Scans, parses and interprets `source`, returning everything written to
/// stdout as a single string and whether a runtime error was reported.
/// Uses an `Rc<RefCell<Vec<u8>>>`-backed sink so the bytes are still
/// readable after `interpret` (which takes ownership of the writer) returns.
fn run_capturing(source: &str) -> (String, bool) {
    use std::cell::RefCell;
    use std::io::Write;
    use std::rc::Rc;

    #[derive(Clone)]
    struct Shared(Rc<RefCell<Vec<u8>>>);
    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let mut reporter = ConsoleReporter::new();
    let tokens = scan_tokens(source, &mut reporter);
    let statements = parse(&tokens, &mut reporter);
    assert!(!reporter.had_error(), "source failed to compile: {source}");

    let sink = Shared(Rc::new(RefCell::new(Vec::new())));
    let mut interpreter = Interpreter::with_output(64, Box::new(sink.clone()));
    interpreter.interpret(&statements, &mut reporter);

    let bytes = sink.0.borrow().clone();
    (String::from_utf8(bytes).unwrap(), reporter.had_runtime_error())
}

#[test]
fn scenario_1_addition() {
    let (out, err) = run_capturing("print 1 + 2;");
    assert_eq!(out, "3\n");
    assert!(!err);
}

#[test]
fn scenario_2_string_concatenation() {
    let (out, err) = run_capturing(r#"print "foo" + "bar";"#);
    assert_eq!(out, "foobar\n");
    assert!(!err);
}

#[test]
fn scenario_3_block_scoping_shadows_and_restores() {
    let (out, err) = run_capturing(
        r#"var a = 1; { var a = 2; print a; } print a;"#,
    );
    assert_eq!(out, "2\n1\n");
    assert!(!err);
}

#[test]
fn scenario_4_closures_capture_definition_site_environment() {
    let (out, err) = run_capturing(
        r#"var a = "global"; fun show() { print a; } show(); a = "changed"; show();"#,
    );
    assert_eq!(out, "global\nchanged\n");
    assert!(!err);
}

#[test]
fn scenario_5_recursive_fibonacci() {
    let (out, err) = run_capturing(
        r#"fun fib(n) { if (n < 2) return n; return fib(n-1) + fib(n-2); } print fib(10);"#,
    );
    assert_eq!(out, "55\n");
    assert!(!err);
}

#[test]
fn scenario_6_for_loop_desugaring() {
    let (out, err) = run_capturing("for (var i = 0; i < 3; i = i + 1) print i;");
    assert_eq!(out, "0\n1\n2\n");
    assert!(!err);
}

#[test]
fn scenario_7_mixed_type_addition_is_a_runtime_error() {
    let (out, err) = run_capturing(r#"print 1 + "x";"#);
    assert_eq!(out, "");
    assert!(err);
}

#[test]
fn assignment_expression_yields_the_assigned_value() {
    let (out, _) = run_capturing("var a; print a = 3;");
    assert_eq!(out, "3\n");
}

#[test]
fn or_short_circuits_without_evaluating_the_right_operand() {
    let (out, _) = run_capturing(
        r#"fun boom() { print "evaluated"; return true; } print true or boom();"#,
    );
    assert_eq!(out, "true\n");
}

#[test]
fn and_short_circuits_without_evaluating_the_right_operand() {
    let (out, _) = run_capturing(
        r#"fun boom() { print "evaluated"; return true; } print false and boom();"#,
    );
    assert_eq!(out, "false\n");
}

#[test]
fn truthy_or_still_evaluates_the_right_side_when_needed() {
    let (out, _) = run_capturing(r#"print false or "fallback";"#);
    assert_eq!(out, "fallback\n");
}

#[test]
fn a_runtime_error_aborts_only_the_current_interpret_call() {
    let mut reporter = ConsoleReporter::new();
    let tokens = scan_tokens(r#"print 1 + "x"; print "after";"#, &mut reporter);
    let statements = parse(&tokens, &mut reporter);

    let mut interpreter = Interpreter::with_output(64, Box::new(Vec::new()));
    interpreter.interpret(&statements, &mut reporter);
    assert!(reporter.had_runtime_error());

    reporter.reset();
    let more_tokens = scan_tokens("print 1;", &mut reporter);
    let more_statements = parse(&more_tokens, &mut reporter);
    interpreter.interpret(&more_statements, &mut reporter);
    assert!(!reporter.had_runtime_error());
}

#[test]
fn calling_a_non_callable_value_is_a_runtime_error() {
    let (_, err) = run_capturing("var a = 1; a();");
    assert!(err);
}

#[test]
fn calling_with_the_wrong_number_of_arguments_is_a_runtime_error() {
    let (_, err) = run_capturing("fun f(a, b) { return a + b; } f(1);");
    assert!(err);
}

#[test]
fn undefined_variable_reference_is_a_runtime_error() {
    let (_, err) = run_capturing("print undefined_name;");
    assert!(err);
}

#[test]
fn assigning_to_an_undefined_name_is_a_runtime_error() {
    let (_, err) = run_capturing("undefined_name = 1;");
    assert!(err);
}

#[test]
fn number_stringification_strips_trailing_zero_for_integers() {
    let (out, _) = run_capturing("print 4.0; print 4.5;");
    assert_eq!(out, "4\n4.5\n");
}

#[test]
fn nil_and_false_are_falsey_everything_else_is_truthy() {
    let (out, _) = run_capturing(
        r#"if (nil) print "a"; else print "b"; if (0) print "c"; else print "d"; if ("") print "e"; else print "f";"#,
    );
    assert_eq!(out, "b\nc\ne\n");
}

#[test]
fn deep_recursion_raises_a_stack_overflow_runtime_error_instead_of_crashing() {
    let (_, err) = run_capturing("fun loop() { return loop(); } print loop();");
    assert!(err);
}
