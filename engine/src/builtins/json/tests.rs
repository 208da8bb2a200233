use crate::context::ContextBuilder;

#[test]
fn stringify_then_parse_round_trips_a_plain_object() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("JSON.parse(JSON.stringify({ a: 1, b: [1, 2] })).b[1];").unwrap();
    assert_eq!(result.as_number(), Some(2.0));
}

#[test]
fn stringify_drops_undefined_and_function_valued_properties() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("JSON.stringify({ a: undefined, b: function () {}, c: 2 });").unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some(r#"{"c":2}"#.to_string()));
}

#[test]
fn parse_rejects_invalid_input() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("JSON.parse('{not valid}');");
    assert!(result.is_err());
}
