use crate::context::ContextBuilder;

#[test]
fn keys_reports_only_own_enumerable_names() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("Object.keys({ a: 1, b: 2, c: 3 }).length;").unwrap();
    assert_eq!(result.as_number(), Some(3.0));
}

#[test]
fn assign_copies_source_properties_onto_the_target() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("Object.assign({ a: 1 }, { b: 2 }).b;").unwrap();
    assert_eq!(result.as_number(), Some(2.0));
}

#[test]
fn freeze_prevents_further_mutation() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("let o = Object.freeze({ a: 1 }); o.a = 2; Object.isFrozen(o) && o.a === 1;").unwrap();
    assert_eq!(result.to_boolean(), true);
}

#[test]
fn has_own_property_ignores_the_prototype_chain() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("({}).hasOwnProperty('toString');").unwrap();
    assert_eq!(result.to_boolean(), false);
}
