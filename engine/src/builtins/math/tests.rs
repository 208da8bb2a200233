use crate::context::ContextBuilder;

#[test]
fn abs_floor_and_sqrt_match_f64() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("Math.abs(-3.5) + Math.floor(3.7) + Math.sqrt(9);").unwrap();
    assert_eq!(result.as_number(), Some(3.5 + 3.0 + 3.0));
}

#[test]
fn max_and_min_ignore_argument_order() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("Math.max(1, 5, 3) - Math.min(1, 5, 3);").unwrap();
    assert_eq!(result.as_number(), Some(4.0));
}

#[test]
fn random_stays_within_the_unit_interval() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("let r = Math.random(); r >= 0 && r < 1;").unwrap();
    assert_eq!(result.to_boolean(), true);
}
