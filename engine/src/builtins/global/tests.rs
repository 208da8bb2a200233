use crate::context::ContextBuilder;

#[test]
fn global_this_exposes_the_constructors() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("globalThis.Array === Array;").unwrap();
    assert_eq!(result.to_boolean(), true);
}

#[test]
fn is_nan_and_is_finite_agree_on_nan() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("isNaN(NaN) && !isFinite(NaN);").unwrap();
    assert_eq!(result.to_boolean(), true);
}

#[test]
fn unqualified_parse_int_stops_at_the_first_non_digit() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("parseInt('42px');").unwrap();
    assert_eq!(result.as_number(), Some(42.0));
}
