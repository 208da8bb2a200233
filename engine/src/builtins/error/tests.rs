use crate::context::ContextBuilder;

#[test]
fn type_error_carries_its_message() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("new TypeError('bad arg').toString();").unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("TypeError: bad arg".to_string()));
}

#[test]
fn error_subtypes_inherit_from_error_prototype() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("new RangeError() instanceof Error;").unwrap();
    assert_eq!(result.to_boolean(), true);
}
