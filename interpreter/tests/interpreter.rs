// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use pretty_assertions::assert_eq;
use rstest::rstest;

use jaolang_interpreter::{
    BufferedConsole,
    Interpreter,
    Lexer,
    ParseTree,
    Parser,
    RuntimeError,
    SourceCode,
    TypeError,
    Value,
};

fn parse(input: &str) -> ParseTree {
    let source_code = SourceCode::new("test.jao", input.to_string());
    let (tokens, errors) = Lexer::new(&source_code).collect_all();
    assert_eq!(errors, Vec::new());

    Parser::new(&tokens).parse_tree().unwrap()
}

fn run_with_input(input: &str, lines: &[&str]) -> Interpreter<BufferedConsole> {
    let tree = parse(input);

    let mut interpreter = Interpreter::new(BufferedConsole::with_input(lines.iter().copied()));
    if let Err(error) = interpreter.execute_tree(&tree) {
        panic!("unexpected runtime error: {error}");
    }

    interpreter
}

fn run(input: &str) -> Vec<String> {
    run_with_input(input, &[]).into_console().output().to_vec()
}

fn run_expecting_error(input: &str) -> (Vec<String>, RuntimeError) {
    let tree = parse(input);

    let mut interpreter = Interpreter::new(BufferedConsole::new());
    let error = interpreter.execute_tree(&tree).unwrap_err();

    (interpreter.into_console().output().to_vec(), error)
}

#[test]
fn assignment_updates_the_environment() {
    let interpreter = run_with_input("x = 5 print(x)", &[]);

    assert_eq!(interpreter.environment().get("x"), Some(&Value::Integer(5)));
    assert_eq!(interpreter.into_console().output(), ["5"]);
}

#[rstest]
#[case("print(1 + 2 * 3)", "7")]
#[case("print((1 + 2) * 3)", "9")]
#[case("print(10 - 2 - 3)", "5")]
#[case("print(7 / 2)", "3")]
#[case("print(-5)", "-5")]
#[case("print(-(1 + 2))", "-3")]
#[case("print(\"foo\" + \"bar\")", "foobar")]
#[case("print(true)", "true")]
#[case("print(1 == 1)", "true")]
#[case("print(\"a\" == \"b\")", "false")]
#[case("print(\"a\" < \"b\")", "true")]
#[case("print(2 > 3)", "false")]
#[case("print(true == false)", "false")]
fn expression_output(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(run(input), [expected]);
}

#[rstest]
#[case("if (1 < 2) { print(\"yes\") } else { print(\"no\") }", "yes")]
#[case("if (2 < 1) { print(\"yes\") } else { print(\"no\") }", "no")]
fn if_picks_the_right_branch(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(run(input), [expected]);
}

#[test]
fn if_without_else_may_do_nothing() {
    assert_eq!(run("if (false) { print(1) }"), Vec::<String>::new());
}

#[rstest]
#[case("repeat(3) { print(\"hi\") }", 3)]
#[case("repeat(0) { print(\"hi\") }", 0)]
#[case("repeat(-1) { print(\"hi\") }", 0)]
fn repeat_runs_the_body_count_times(#[case] input: &str, #[case] expected: usize) {
    assert_eq!(run(input), vec!["hi"; expected]);
}

#[test]
fn repeat_evaluates_the_count_once() {
    let output = run("n = 2 repeat(n) { n = n + 10 print(n) }");

    assert_eq!(output, ["12", "22"]);
}

#[rstest]
#[case("when (1 < 2) { print(\"fired\") }", vec!["fired"])]
#[case("when (2 < 1) { print(\"fired\") }", Vec::new())]
fn when_is_a_guarded_block(#[case] input: &str, #[case] expected: Vec<&str>) {
    assert_eq!(run(input), expected);
}

#[test]
fn for_loop_with_full_header() {
    let output = run("for (i = 0; i < 3; i = i + 1) { print(i) }");

    assert_eq!(output, ["0", "1", "2"]);
}

#[test]
fn for_loop_without_initializer_and_step() {
    let output = run("i = 0 for (; i < 2 ;) { print(i) i = i + 1 }");

    assert_eq!(output, ["0", "1"]);
}

#[test]
fn blocks_do_not_open_a_new_scope() {
    assert_eq!(run("{ x = 1 } print(x)"), ["1"]);
}

#[rstest]
#[case("print(false && 1 / 0 == 0)", "false")]
#[case("print(true || 1 / 0 == 0)", "true")]
fn logical_operators_short_circuit(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(run(input), [expected]);
}

#[test]
fn division_by_zero_keeps_earlier_output() {
    let (output, error) = run_expecting_error("print(1) print(5 / 0)");

    assert_eq!(output, ["1"]);
    assert!(matches!(error, RuntimeError::DivisionByZero { .. }));
}

#[test]
fn reading_an_undefined_variable_fails() {
    let (output, error) = run_expecting_error("print(ghost)");

    assert_eq!(output, Vec::<String>::new());
    let RuntimeError::UndefinedVariable { name, .. } = error else {
        panic!("expected an undefined-variable error, got: {error:?}");
    };
    assert_eq!(name, "ghost");
}

#[rstest]
#[case("print(1 + \"a\")")]
#[case("print(\"a\" - \"b\")")]
#[case("print(1 == \"a\")")]
#[case("print(true < false)")]
#[case("print(-true)")]
#[case("print(1 && true)")]
#[case("print(false || \"a\")")]
#[case("if (1) { print(1) }")]
#[case("when (\"x\") { print(1) }")]
#[case("repeat(\"x\") { print(1) }")]
fn type_errors_abort_the_run(#[case] input: &str) {
    let (output, error) = run_expecting_error(input);

    assert_eq!(output, Vec::<String>::new());
    assert!(matches!(error, RuntimeError::Type(..)), "got: {error:?}");
}

#[test]
fn runtime_errors_carry_a_name_and_a_hint() {
    let (_, error) = run_expecting_error("print(ghost)");

    assert_eq!(error.name(), "UndefinedVariable");
    assert_eq!(
        error.hint(),
        Some("assign a value to `ghost` before using it".to_string())
    );

    let (_, error) = run_expecting_error("print(1 + \"a\")");

    assert_eq!(error.name(), "InvalidOperands");
    assert_eq!(error.hint(), None);
}

#[test]
fn mismatched_operands_report_both_types() {
    let (_, error) = run_expecting_error("print(1 + \"a\")");

    let RuntimeError::Type(TypeError::InvalidOperands { lhs, rhs, .. }) = error else {
        panic!("expected an invalid-operands error, got: {error:?}");
    };
    assert_eq!((lhs, rhs), ("int", "string"));
}

#[test]
fn scan_parses_an_integer_for_an_integer_target() {
    let interpreter = run_with_input("x = 0 scan x print(x + 1)", &["41"]);

    assert_eq!(interpreter.environment().get("x"), Some(&Value::Integer(41)));
    assert_eq!(interpreter.into_console().output(), ["42"]);
}

#[test]
fn scan_binds_a_string_for_a_fresh_target() {
    let interpreter = run_with_input("scan name print(\"hi \" + name)", &["jao"]);

    assert_eq!(
        interpreter.environment().get("name"),
        Some(&Value::String("jao".to_string()))
    );
    assert_eq!(interpreter.into_console().output(), ["hi jao"]);
}

#[test]
fn scan_rejects_a_non_numeric_line_for_an_integer_target() {
    let tree = parse("x = 0 scan x");

    let mut interpreter = Interpreter::new(BufferedConsole::with_input(["abc"]));
    let error = interpreter.execute_tree(&tree).unwrap_err();

    assert!(matches!(error, RuntimeError::InvalidInput { .. }), "got: {error:?}");
}

#[test]
fn scan_without_input_fails() {
    let (_, error) = run_expecting_error("scan x");

    assert!(matches!(error, RuntimeError::InputExhausted { .. }));
}
