//! Cross-cutting, language-level tests driven through [`crate::Context`]
//! rather than unit tests against a single module — the counterpart to
//! the `tests.rs` files under `builtins/`, which exercise one builtin at
//! a time.

mod control_flow;
mod env;
mod facade;
mod function;
mod iterators;
mod operators;
mod promise;

use crate::context::ContextBuilder;
use crate::value::JsValue;

#[test]
fn evaluates_a_trivial_script() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("1 + 2;").unwrap();
    assert_eq!(result.as_number(), Some(3.0));
}

#[test]
fn globals_are_reachable_from_script_scope() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("typeof Object === 'function' && typeof Array === 'function';").unwrap();
    assert_eq!(result.to_boolean(), true);
}

#[test]
fn empty_let_decl_is_undefined() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("let a; a;").unwrap();
    assert!(matches!(result, JsValue::Undefined));
}

#[test]
fn var_decl_hoists_above_its_first_use() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("x = 5; var x; x;").unwrap();
    assert_eq!(result.as_number(), Some(5.0));
}

#[test]
fn referencing_an_undeclared_identifier_throws_a_reference_error() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("bar;");
    assert!(result.is_err());
}

#[test]
fn function_declarations_are_hoisted_to_the_top_of_their_block() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("let a = hello(); function hello() { return 5; } a;").unwrap();
    assert_eq!(result.as_number(), Some(5.0));
}
