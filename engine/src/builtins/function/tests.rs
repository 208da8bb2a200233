use crate::context::ContextBuilder;

#[test]
fn call_invokes_with_an_explicit_this() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("function f() { return this.x; } f.call({ x: 42 });").unwrap();
    assert_eq!(result.as_number(), Some(42.0));
}

#[test]
fn apply_spreads_an_argument_array() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("function add(a, b) { return a + b; } add.apply(null, [1, 2]);").unwrap();
    assert_eq!(result.as_number(), Some(3.0));
}

#[test]
fn bind_pins_this_and_leading_arguments() {
    let mut context = ContextBuilder::new().build();
    let result = context
        .evaluate_script("function add(a, b) { return a + b; } let add5 = add.bind(null, 5); add5(2);")
        .unwrap();
    assert_eq!(result.as_number(), Some(7.0));
}
