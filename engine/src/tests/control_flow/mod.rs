//! `break`/`continue`/`throw`/`try`-`finally` unwinding through nested
//! statements, as distinct from the loop-construct-specific tests in
//! [`loops`].

mod loops;

use crate::context::ContextBuilder;

#[test]
fn try_finally_runs_even_when_the_try_block_throws() {
    let mut context = ContextBuilder::new().build();
    let result = context
        .evaluate_script("let ran = false; try { throw 1; } catch (e) {} finally { ran = true; } ran;")
        .unwrap();
    assert_eq!(result.to_boolean(), true);
}

#[test]
fn finally_runs_on_the_way_out_of_a_returning_try_block() {
    let mut context = ContextBuilder::new().build();
    let result = context
        .evaluate_script("let ran = false; function f() { try { return 1; } finally { ran = true; } } f(); ran;")
        .unwrap();
    assert_eq!(result.to_boolean(), true);
}

#[test]
fn a_finally_blocks_return_value_overrides_the_trys_return_value() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("function f() { try { return 1; } finally { return 2; } } f();").unwrap();
    assert_eq!(result.as_number(), Some(2.0));
}

#[test]
fn catch_binding_receives_the_thrown_value() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("try { throw 'boom'; } catch (e) { e; }").unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("boom".to_string()));
}

#[test]
fn an_uncaught_throw_propagates_out_of_evaluate_script() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("throw new Error('uncaught');");
    assert!(result.is_err());
}

#[test]
fn switch_falls_through_absent_a_break() {
    let mut context = ContextBuilder::new().build();
    let result = context
        .evaluate_script(
            "let log = []; switch (1) {
                case 1: log.push('a');
                case 2: log.push('b'); break;
                case 3: log.push('c');
            }
            log.join(',');",
        )
        .unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("a,b".to_string()));
}
