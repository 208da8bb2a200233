use crate::context::ContextBuilder;

#[test]
fn loose_equals_coerces_across_types() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("(1 == '1') && (null == undefined) && (0 == false);").unwrap();
    assert_eq!(result.to_boolean(), true);
}

#[test]
fn strict_equals_rejects_type_coercion() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("(1 === '1') || (null === undefined);").unwrap();
    assert_eq!(result.to_boolean(), false);
}

#[test]
fn nullish_coalescing_only_falls_through_on_null_or_undefined() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("(0 ?? 5) + (null ?? 5) + (undefined ?? 5);").unwrap();
    assert_eq!(result.as_number(), Some(10.0));
}

#[test]
fn logical_and_or_short_circuit() {
    let mut context = ContextBuilder::new().build();
    let result = context
        .evaluate_script("var ran = false; function mark() { ran = true; return true; } false && mark(); !ran;")
        .unwrap();
    assert_eq!(result.to_boolean(), true);
}

#[test]
fn in_operator_checks_the_prototype_chain() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("function F() {} F.prototype.shared = 1; 'shared' in new F();").unwrap();
    assert_eq!(result.to_boolean(), true);
}

#[test]
fn instanceof_follows_the_constructor_prototype_link() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("function F() {} (new F()) instanceof F;").unwrap();
    assert_eq!(result.to_boolean(), true);
}

#[test]
fn bitwise_shift_operators_wrap_to_int32() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("(1 << 3) | (8 >> 2);").unwrap();
    assert_eq!(result.as_number(), Some(10.0));
}

#[test]
fn string_concatenation_beats_numeric_addition_when_either_side_is_a_string() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("1 + '2' + 3;").unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("123".to_string()));
}
