use super::*;
use pretty_assertions::assert_eq;

fn strip(source: &str) -> String {
    strip_types(source).unwrap()
}

#[test]
fn plain_source_passes_through_verbatim() {
    let source = "let x = 1;\nconsole.log(x ?? 'none', x?.y);";
    assert_eq!(strip(source), source);
}

#[test]
fn binding_annotations_are_erased() {
    assert_eq!(strip("let msg: Str = 'hi';"), "let msg = 'hi';");
    assert_eq!(strip("const n: Num = 2;"), "const n = 2;");
}

#[test]
fn composite_binding_annotations_are_erased() {
    assert_eq!(strip("let xs: Num[] = [1];"), "let xs = [1];");
    assert_eq!(strip("let m: Map<Str, Num> = null;"), "let m = null;");
    assert_eq!(strip("let o: { a: Num } = { a: 1 };"), "let o = { a: 1 };");
}

#[test]
fn union_binding_annotation_is_erased() {
    assert_eq!(strip("let u: Num | Str = 1;"), "let u = 1;");
}

#[test]
fn uninitialized_annotated_binding_keeps_following_statements() {
    // The annotation ends with the type itself; without an `=` or `;`
    // the next statement must pass through untouched.
    assert_eq!(
        strip("let x: Num\nconsole.log(1)"),
        "let x\nconsole.log(1)"
    );
    assert_eq!(
        strip("let x: Num\nx = 5\nconsole.log(x)"),
        "let x\nx = 5\nconsole.log(x)"
    );
    assert_eq!(strip("let x: Num"), "let x");
}

#[test]
fn object_literal_colons_survive() {
    assert_eq!(strip("let o = { a: 1 };"), "let o = { a: 1 };");
}

#[test]
fn param_and_return_annotations_are_erased() {
    assert_eq!(
        strip("function add(a: Num, b: Num): Num { return a + b; }"),
        "function add(a, b) { return a + b; }"
    );
}

#[test]
fn optional_parameter_marker_is_erased() {
    assert_eq!(
        strip("function greet(name?: Str) { return name ?? 'you'; }"),
        "function greet(name) { return name ?? 'you'; }"
    );
}

#[test]
fn default_value_ternary_colon_survives() {
    assert_eq!(
        strip("function pick(a = x ? 1 : 2) { return a; }"),
        "function pick(a = x ? 1 : 2) { return a; }"
    );
}

#[test]
fn function_generics_are_erased() {
    assert_eq!(
        strip("function id<T>(v: T): T { return v; }"),
        "function id(v) { return v; }"
    );
}

#[test]
fn call_site_generics_are_erased() {
    assert_eq!(strip("id<Num>(3);"), "id(3);");
}

#[test]
fn comparison_is_not_a_generic() {
    assert_eq!(strip("let ok = a < b;"), "let ok = a < b;");
}

#[test]
fn interface_declarations_are_erased() {
    assert_eq!(
        strip("interface Point { x: Num; y: Num }\nlet p = { x: 1, y: 2 };"),
        "\nlet p = { x: 1, y: 2 };"
    );
}

#[test]
fn interface_with_extends_is_erased() {
    assert_eq!(strip("interface B extends A { z: Num }"), "");
}

#[test]
fn type_alias_is_erased_through_semicolon() {
    assert_eq!(strip("type Name = Str;\nlet n = 'x';"), "\nlet n = 'x';");
}

#[test]
fn newline_terminated_type_alias_stops_at_next_statement() {
    assert_eq!(strip("type Pair = { a: Num }\nlet p = 1;"), "\nlet p = 1;");
}

#[test]
fn as_assertion_is_erased_without_leaving_a_gap() {
    assert_eq!(strip("let n = v as Num;"), "let n = v;");
    assert_eq!(strip("let xs = v as Num[];"), "let xs = v;");
}

#[test]
fn non_null_assertion_is_erased() {
    assert_eq!(strip("user!.name;"), "user.name;");
    assert_eq!(strip("items[0]!.id;"), "items[0].id;");
}

#[test]
fn prefix_negation_survives() {
    assert_eq!(strip("if (!ok) { fail(); }"), "if (!ok) { fail(); }");
}

#[test]
fn modifiers_are_erased_before_identifiers() {
    assert_eq!(strip("readonly name"), " name");
    assert_eq!(strip("private count"), " count");
}

#[test]
fn enum_lowers_to_object_binding() {
    assert_eq!(
        strip("enum Color { Red, Green, Blue }"),
        "let Color = { Red: 0, Green: 1, Blue: 2 };"
    );
}

#[test]
fn enum_explicit_values_resume_auto_increment() {
    assert_eq!(
        strip("enum Code { Ok, NotFound = 404, Next }"),
        "let Code = { Ok: 0, NotFound: 404, Next: 405 };"
    );
}

#[test]
fn enum_non_numeric_initializer_is_a_transform_error() {
    let err = strip_types("enum E { A = 'a' }").unwrap_err();
    assert!(matches!(err, CompilerError::Transform(_)));
}

#[test]
fn namespace_is_rejected_with_a_diagnostic() {
    let err = strip_types("namespace Util { }").unwrap_err();
    assert_eq!(
        err,
        CompilerError::Transform("namespace declarations are not supported".into())
    );
}

#[test]
fn lex_failure_is_a_transform_error() {
    let err = strip_types("let s = 'unterminated").unwrap_err();
    assert!(matches!(err, CompilerError::Transform(_)));
}

#[test]
fn unclosed_interface_is_a_transform_error() {
    let err = strip_types("interface P { x: Num").unwrap_err();
    assert!(matches!(err, CompilerError::Transform(_)));
}

#[test]
fn contextual_keywords_stay_usable_as_identifiers() {
    assert_eq!(strip("let type = 5;"), "let type = 5;");
    assert_eq!(strip("console.log(status);"), "console.log(status);");
}
