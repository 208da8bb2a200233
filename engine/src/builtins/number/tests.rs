use crate::context::ContextBuilder;

#[test]
fn is_integer_rejects_fractional_and_nan_values() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("Number.isInteger(4) && !Number.isInteger(4.5) && !Number.isInteger(NaN);").unwrap();
    assert_eq!(result.to_boolean(), true);
}

#[test]
fn to_fixed_pads_to_the_requested_precision() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("(1).toFixed(2);").unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("1.00".to_string()));
}

#[test]
fn number_call_form_coerces_a_numeric_string() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("Number('42');").unwrap();
    assert_eq!(result.as_number(), Some(42.0));
}

#[test]
fn parse_int_honors_an_explicit_radix() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("parseInt('ff', 16);").unwrap();
    assert_eq!(result.as_number(), Some(255.0));
}
