use crate::context::ContextBuilder;

#[test]
fn closures_capture_their_defining_environment() {
    let mut context = ContextBuilder::new().build();
    let result = context
        .evaluate_script("function counter() { let n = 0; return function () { return ++n; }; } let c = counter(); c(); c(); c();")
        .unwrap();
    assert_eq!(result.as_number(), Some(3.0));
}

#[test]
fn arrow_functions_inherit_this_from_their_enclosing_scope() {
    let mut context = ContextBuilder::new().build();
    let result = context
        .evaluate_script("var o = { x: 5, get() { return (() => this.x)(); } }; o.get();")
        .unwrap();
    assert_eq!(result.as_number(), Some(5.0));
}

#[test]
fn default_parameters_apply_only_when_the_argument_is_undefined() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("function f(a = 10) { return a; } f() + f(undefined) + f(1);").unwrap();
    assert_eq!(result.as_number(), Some(21.0));
}

#[test]
fn rest_parameters_collect_the_remaining_arguments_into_an_array() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("function f(a, ...rest) { return rest.length; } f(1, 2, 3, 4);").unwrap();
    assert_eq!(result.as_number(), Some(3.0));
}

#[test]
fn this_binding_in_an_object_method_refers_to_the_receiver() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("var foo = { a: 3, bar: function () { return this.a + 5; } }; foo.bar();").unwrap();
    assert_eq!(result.as_number(), Some(8.0));
}

#[test]
fn a_function_expression_does_not_leak_its_own_name_into_the_enclosing_scope() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("let f = function named() { return typeof named; }; f();").unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("function".to_string()));
    let leaked = context.evaluate_script("typeof named;").unwrap();
    assert_eq!(leaked.as_string().map(|s| s.to_string()), Some("undefined".to_string()));
}

#[test]
fn return_unwinds_past_nested_blocks_without_running_later_statements() {
    let mut context = ContextBuilder::new().build();
    let result = context
        .evaluate_script("function f() { if (true) { return 1; } return 2; } f();")
        .unwrap();
    assert_eq!(result.as_number(), Some(1.0));
}

#[test]
fn unbounded_recursion_raises_a_catchable_range_error_instead_of_crashing() {
    let mut context = ContextBuilder::new().build();
    let result = context
        .evaluate_script(
            "function recurse() { return recurse(); }
            try { recurse(); 'no error'; } catch (e) { e instanceof RangeError; }",
        )
        .unwrap();
    assert_eq!(result.to_boolean(), true);
}
