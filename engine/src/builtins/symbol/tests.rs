use crate::context::ContextBuilder;

#[test]
fn each_call_produces_a_distinct_symbol() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("Symbol('a') === Symbol('a');").unwrap();
    assert_eq!(result.to_boolean(), false);
}

#[test]
fn well_known_symbols_are_stable_across_lookups() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("Symbol.iterator === Symbol.iterator;").unwrap();
    assert_eq!(result.to_boolean(), true);
}

#[test]
fn symbol_is_not_constructible() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("new Symbol();");
    assert!(result.is_err());
}
