use crate::context::ContextBuilder;

#[test]
fn log_returns_undefined() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("console.log('hello', 1, true);").unwrap();
    assert!(matches!(result, crate::value::JsValue::Undefined));
}

#[test]
fn log_and_error_are_distinct_methods() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("console.log !== console.error;").unwrap();
    assert_eq!(result.to_boolean(), true);
}
