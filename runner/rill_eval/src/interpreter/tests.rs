#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use rill_console::{shared_buffer, CaptureConsole, OutputLine, Severity};

use crate::errors::EvalError;
use crate::Interpreter;

fn run(source: &str) -> (Result<(), EvalError>, Vec<OutputLine>) {
    let buffer = shared_buffer();
    let console = CaptureConsole::new(buffer.clone());
    let tokens = rill_lexer::lex(source).unwrap();
    let program = rill_parse::parse(&tokens).unwrap();
    let result = Interpreter::new(console).run(&program);
    (result, buffer.lines())
}

fn logs(source: &str) -> Vec<String> {
    let (result, lines) = run(source);
    result.unwrap();
    lines.into_iter().map(|line| line.text).collect()
}

fn fails(source: &str) -> EvalError {
    run(source).0.unwrap_err()
}

#[test]
fn console_methods_map_to_severities() {
    let (result, lines) = run("console.log('a'); console.warn('b'); console.error('c');");
    result.unwrap();
    assert_eq!(
        lines,
        vec![
            OutputLine::new(Severity::Info, "a"),
            OutputLine::new(Severity::Warning, "b"),
            OutputLine::new(Severity::Error, "c"),
        ]
    );
}

#[test]
fn console_joins_arguments_with_one_space() {
    assert_eq!(logs("console.log('sum', 1 + 2, true);"), vec!["sum 3 true"]);
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(logs("console.log(1 + 2 * 3);"), vec!["7"]);
    assert_eq!(logs("console.log((1 + 2) * 3);"), vec!["9"]);
    assert_eq!(logs("console.log(7 % 4 - 1);"), vec!["2"]);
}

#[test]
fn division_follows_float_semantics() {
    assert_eq!(logs("console.log(1 / 0);"), vec!["Infinity"]);
    assert_eq!(logs("console.log(0 / 0);"), vec!["NaN"]);
    assert_eq!(logs("console.log(5 / 2);"), vec!["2.5"]);
}

#[test]
fn string_concatenation_coerces_either_side() {
    assert_eq!(logs("console.log('n = ' + 4);"), vec!["n = 4"]);
    assert_eq!(logs("console.log(4 + 'th');"), vec!["4th"]);
}

#[test]
fn nullish_and_optional_chaining() {
    assert_eq!(
        logs("let o = null; console.log(o?.name); console.log(o?.name ?? 'anonymous');"),
        vec!["null", "anonymous"]
    );
    // ?? passes through falsy non-null values, unlike ||
    assert_eq!(logs("console.log(0 ?? 1); console.log(0 || 1);"), vec!["0", "1"]);
}

#[test]
fn member_read_on_null_is_an_error_without_the_question_mark() {
    assert_eq!(
        fails("let o = null; o.name;").message,
        "Cannot read properties of null (reading 'name')"
    );
}

#[test]
fn closures_capture_their_defining_scope() {
    let source = "
        let count = 0;
        function bump() { count = count + 1; return count; }
        bump();
        bump();
        console.log(bump());
    ";
    assert_eq!(logs(source), vec!["3"]);
}

#[test]
fn recursion() {
    let source = "
        function fib(n) {
            if (n < 2) { return n; }
            return fib(n - 1) + fib(n - 2);
        }
        console.log(fib(10));
    ";
    assert_eq!(logs(source), vec!["55"]);
}

#[test]
fn while_loop_runs_to_completion() {
    let source = "
        let i = 0;
        let total = 0;
        while (i < 5) {
            total = total + i;
            i = i + 1;
        }
        console.log(total);
    ";
    assert_eq!(logs(source), vec!["10"]);
}

#[test]
fn missing_arguments_bind_null() {
    assert_eq!(
        logs("function f(a, b) { return b ?? 'default'; } console.log(f(1));"),
        vec!["default"]
    );
}

#[test]
fn const_reassignment_fails() {
    assert_eq!(
        fails("const c = 1; c = 2;").message,
        "Assignment to constant variable."
    );
}

#[test]
fn unbound_name_fails() {
    assert_eq!(fails("console.log(missing);").message, "missing is not defined");
}

#[test]
fn calling_a_non_function_fails() {
    assert_eq!(fails("let n = 3; n();").message, "3 is not a function");
}

#[test]
fn throw_surfaces_the_rendered_value() {
    assert_eq!(fails("throw 'boom';").message, "Uncaught boom");
    assert_eq!(fails("throw 1 + 1;").message, "Uncaught 2");
}

#[test]
fn output_before_a_runtime_error_is_kept() {
    let (result, lines) = run("console.log('before'); throw 'late';");
    assert_eq!(result.unwrap_err().message, "Uncaught late");
    assert_eq!(lines, vec![OutputLine::new(Severity::Info, "before")]);
}

#[test]
fn objects_render_indented_in_insertion_order() {
    let source = "console.log({ name: 'rill', tags: ['a', 'b'] });";
    assert_eq!(
        logs(source),
        vec!["{\n  \"name\": \"rill\",\n  \"tags\": [\n    \"a\",\n    \"b\"\n  ]\n}"]
    );
}

#[test]
fn function_entries_are_omitted_from_rendered_objects() {
    let source = "
        function noop() { return null; }
        console.log({ f: noop, kept: 1 });
        console.log([noop]);
    ";
    assert_eq!(
        logs(source),
        vec!["{\n  \"kept\": 1\n}", "[\n  null\n]"]
    );
}

#[test]
fn objects_have_reference_semantics() {
    let source = "
        let a = { n: 1 };
        let b = a;
        b.n = 2;
        console.log(a.n);
    ";
    assert_eq!(logs(source), vec!["2"]);
}

#[test]
fn list_reads_and_length() {
    let source = "
        let xs = [10, 20, 30];
        console.log(xs[1], xs.length, xs[9]);
    ";
    assert_eq!(logs(source), vec!["20 3 null"]);
}

#[test]
fn list_writes_extend_with_nulls() {
    assert_eq!(
        logs("let xs = [1]; xs[2] = 3; console.log(xs);"),
        vec!["[\n  1,\n  null,\n  3\n]"]
    );
}

#[test]
fn ternary_and_truthiness() {
    assert_eq!(logs("console.log('' ? 'yes' : 'no');"), vec!["no"]);
    assert_eq!(logs("console.log([] ? 'yes' : 'no');"), vec!["yes"]);
    assert_eq!(logs("console.log(!0, !'x');"), vec!["true false"]);
}

#[test]
fn equality_is_strict() {
    assert_eq!(logs("console.log(1 == 1, '1' == 1);"), vec!["true false"]);
    assert_eq!(logs("console.log(null == false);"), vec!["false"]);
}

#[test]
fn top_level_return_is_rejected() {
    assert_eq!(fails("return 1;").message, "Illegal return statement");
}
