use lox_ast::{Expr, LiteralValue, Stmt};
use lox_diagnostics::{ConsoleReporter, Reporter};
use lox_lexer::scan_tokens;

use crate::parse;

fn parse_source(source: &str) -> (Vec<Stmt>, ConsoleReporter) {
    let mut reporter = ConsoleReporter::default();
    let tokens = scan_tokens(source, &mut reporter);
    let statements = parse(&tokens, &mut reporter);
    (statements, reporter)
}

#[test]
fn empty_program_parses_to_no_statements() {
    let (statements, reporter) = parse_source("");
    assert!(statements.is_empty());
    assert!(!reporter.had_error());
}

#[test]
fn n_declarations_yield_n_statements() {
    let (statements, reporter) = parse_source("var a = 1; var b = 2; print a + b;");
    assert_eq!(statements.len(), 3);
    assert!(!reporter.had_error());
}

#[test]
fn assignment_is_right_associative_and_targets_a_variable() {
    let (statements, _) = parse_source("a = b = 3;");
    match &statements[0] {
        Stmt::Expression(stmt) => match &stmt.expr {
            Expr::Assign(assign) => {
                assert_eq!(assign.name.lexeme, "a");
                match &assign.value {
                    Expr::Assign(inner) => assert_eq!(inner.name.lexeme, "b"),
                    other => panic!("expected nested assignment, got {other:?}"),
                }
            }
            other => panic!("expected assignment, got {other:?}"),
        },
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn invalid_assignment_target_is_reported_without_panicking() {
    let (statements, reporter) = parse_source("1 = 2;");
    assert!(reporter.had_error());
    assert_eq!(statements.len(), 1);
}

#[test]
fn precedence_climbs_through_factor_before_term() {
    let (statements, _) = parse_source("1 + 2 * 3;");
    match &statements[0] {
        Stmt::Expression(stmt) => match &stmt.expr {
            Expr::Binary(binary) => {
                assert_eq!(binary.op.lexeme, "+");
                match &binary.right {
                    Expr::Binary(inner) => assert_eq!(inner.op.lexeme, "*"),
                    other => panic!("expected multiplication on the right, got {other:?}"),
                }
            }
            other => panic!("expected binary expression, got {other:?}"),
        },
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn for_loop_desugars_to_a_block_containing_the_initializer_and_a_while() {
    let (statements, reporter) = parse_source("for (var i = 0; i < 3; i = i + 1) print i;");
    assert!(!reporter.had_error());
    match &statements[0] {
        Stmt::Block(block) => {
            assert_eq!(block.statements.len(), 2);
            assert!(matches!(block.statements[0], Stmt::Var(_)));
            assert!(matches!(block.statements[1], Stmt::While(_)));
        }
        other => panic!("expected desugared block, got {other:?}"),
    }
}

#[test]
fn for_loop_with_no_condition_defaults_to_true() {
    let (statements, _) = parse_source("for (;;) print 1;");
    let while_stmt = match &statements[0] {
        Stmt::While(w) => w,
        other => panic!("expected a while loop, got {other:?}"),
    };
    assert!(matches!(
        while_stmt.condition,
        Expr::Literal(LiteralValue::Boolean(true))
    ));
}

#[test]
fn call_captures_the_closing_paren_for_error_reporting() {
    let (statements, _) = parse_source("clock();");
    match &statements[0] {
        Stmt::Expression(stmt) => match &stmt.expr {
            Expr::Call(call) => assert_eq!(call.paren.lexeme, ")"),
            other => panic!("expected call expression, got {other:?}"),
        },
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn more_than_255_arguments_is_reported_but_does_not_abort_parsing() {
    let args = (0..300)
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let source = format!("f({args});");
    let (statements, reporter) = parse_source(&source);
    assert!(reporter.had_error());
    assert_eq!(statements.len(), 1);
}

#[test]
fn a_syntax_error_is_recovered_from_and_later_statements_still_parse() {
    let (statements, reporter) = parse_source("var a = ; print 2;");
    assert!(reporter.had_error());
    assert_eq!(statements.len(), 1);
    assert!(matches!(statements[0], Stmt::Print(_)));
}

#[test]
fn function_declaration_collects_its_parameters_and_body() {
    let (statements, _) = parse_source("fun add(a, b) { return a + b; }");
    match &statements[0] {
        Stmt::Function(func) => {
            assert_eq!(func.name.lexeme, "add");
            assert_eq!(func.params.len(), 2);
            assert_eq!(func.body.len(), 1);
        }
        other => panic!("expected function statement, got {other:?}"),
    }
}
