//! Cross-cutting round trips that exercise two or more builtins together
//! through the public API, rather than one module's internals — the
//! teacher's placement for this kind of integration-style check.

use ecma_engine::ContextBuilder;

#[test]
fn json_round_trips_a_nested_structure() {
    let mut context = ContextBuilder::new().build();
    let result = context
        .evaluate_script("JSON.parse(JSON.stringify({ list: [1, 2, { deep: true }] })).list[2].deep;")
        .unwrap();
    assert_eq!(result.to_boolean(), true);
}

#[test]
fn number_to_string_and_back_preserves_the_value() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("Number((123.5).toString());").unwrap();
    assert_eq!(result.as_number(), Some(123.5));
}

#[test]
fn string_to_number_and_back_preserves_the_text() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("(42).toString() === String(42);").unwrap();
    assert_eq!(result.to_boolean(), true);
}

#[test]
fn array_join_and_split_are_inverse_operations_for_simple_elements() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("['a', 'b', 'c'].join('-').split('-').length;").unwrap();
    assert_eq!(result.as_number(), Some(3.0));
}

#[test]
fn a_thrown_error_carries_its_message_through_to_string() {
    let mut context = ContextBuilder::new().build();
    let result = context
        .evaluate_script("try { JSON.parse('not json'); } catch (e) { e instanceof SyntaxError; }")
        .unwrap();
    assert_eq!(result.to_boolean(), true);
}
