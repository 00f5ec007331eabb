//! End-to-end pipeline tests: source text through the lexer, parser, and
//! evaluator, asserting the exact printed output (§8's numbered scenarios).

use std::cell::RefCell;
use std::rc::Rc;

use zen_eval::Evaluator;
use zen_util::diagnostic::Handler;
use zen_util::FileId;
use zen_value::{Scope, Value};

fn run(source: &str) -> (Value, String) {
    let handler = Handler::new();
    let tokens = zen_lexer::tokenize(source, &handler, FileId(0));
    let program = zen_parser::parse(source, &handler, FileId(0));
    assert!(!handler.has_errors(), "unexpected lex/parse errors for: {source:?}");
    let _ = tokens;

    let buffer = Rc::new(RefCell::new(Vec::new()));
    let scope = zen_stdlib::root_scope_with_stdout(buffer.clone());

    let evaluator = Evaluator::default();
    let result = evaluator.evaluate(&program, &scope);
    let printed = String::from_utf8(buffer.borrow().clone()).expect("stdout is valid utf8");
    (result, printed)
}

#[test]
fn scenario_1_set_and_print_a_number() {
    let (result, stdout) = run("set x 42\nprint x");
    assert!(!result.is_error());
    assert_eq!(stdout, "42\n");
}

#[test]
fn scenario_2_string_concatenation() {
    let (result, stdout) = run("set name \"Alice\"\nprint \"Hello \" + name");
    assert!(!result.is_error());
    assert_eq!(stdout, "Hello Alice\n");
}

#[test]
fn scenario_3_while_loop_counts_up() {
    let (result, stdout) = run("set n 0\nwhile n < 3\n    print n\n    set n n + 1");
    assert!(!result.is_error());
    assert_eq!(stdout, "0\n1\n2\n");
}

#[test]
fn scenario_4_function_definition_and_paren_free_call() {
    let source = "function add a b\n    return a + b\nprint add 2 3";
    let (result, stdout) = run(source);
    assert!(!result.is_error());
    assert_eq!(stdout, "5\n");
}

#[test]
fn scenario_5_array_literal_and_indexing() {
    let (result, stdout) = run("set xs 1, 2, 3\nprint xs[1]");
    assert!(!result.is_error());
    assert_eq!(stdout, "2\n");
}

#[test]
fn scenario_6_if_else_branch() {
    let source = "if 10 >= 18\n    print \"adult\"\nelse\n    print \"minor\"";
    let (result, stdout) = run(source);
    assert!(!result.is_error());
    assert_eq!(stdout, "minor\n");
}

#[test]
fn scenario_7_division_by_zero_yields_error_value() {
    let (result, stdout) = run("set a 10\nset b 0\nprint a / b");
    assert!(stdout.is_empty(), "print never ran on an erroring argument");
    assert!(result.is_error());
    match result {
        Value::Error(e) => {
            assert_eq!(e.code, -203);
        }
        other => panic!("expected an Error value, got {other:?}"),
    }
}

#[test]
fn undefined_variable_is_an_error_value_not_a_panic() {
    let (result, _stdout) = run("print missing");
    assert!(result.is_error());
}

#[test]
fn recursive_function_respects_the_default_recursion_limit() {
    let source = "function loop n\n    return loop n + 1\nprint loop 0";
    let (result, _stdout) = run(source);
    assert!(result.is_error());
}
