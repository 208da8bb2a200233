use crate::context::ContextBuilder;

#[test]
fn accessing_a_let_binding_before_its_declaration_throws() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("{ x; let x = 1; }");
    assert!(result.is_err());
}

#[test]
fn const_bindings_reject_reassignment() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("const x = 1; x = 2;");
    assert!(result.is_err());
}

#[test]
fn block_scoped_let_does_not_escape_its_block() {
    let mut context = ContextBuilder::new().build();
    context.evaluate_script("{ let x = 1; }").unwrap();
    let result = context.evaluate_script("typeof x;").unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("undefined".to_string()));
}

#[test]
fn var_declared_inside_a_block_is_visible_at_function_scope() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("function f() { { var x = 1; } return x; } f();").unwrap();
    assert_eq!(result.as_number(), Some(1.0));
}

#[test]
fn each_loop_iteration_of_a_let_bound_counter_gets_its_own_binding() {
    let mut context = ContextBuilder::new().build();
    let result = context
        .evaluate_script("let fns = []; for (let i = 0; i < 3; i++) { fns.push(() => i); } fns[0]() + fns[1]() + fns[2]();")
        .unwrap();
    assert_eq!(result.as_number(), Some(3.0));
}

#[test]
fn referencing_this_outside_a_function_refers_to_the_global_object() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("this === globalThis;").unwrap();
    assert_eq!(result.to_boolean(), true);
}
