use crate::context::ContextBuilder;

#[test]
fn call_form_coerces_to_a_primitive_boolean() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("Boolean(0).valueOf();").unwrap();
    assert_eq!(result.to_boolean(), false);
}

#[test]
fn wrapper_object_to_string_reads_back_true() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("new Boolean(true).toString();").unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("true".to_string()));
}
