//! End-to-end scenarios that exercise the Promise machinery (§4.9's
//! microtask queue) alongside the rest of the language, as opposed to
//! [`crate::builtins::promise::tests`]'s narrower per-method checks.

use crate::context::ContextBuilder;

#[test]
fn a_promise_chain_runs_after_the_synchronous_script_finishes() {
    let mut context = ContextBuilder::new().build();
    context
        .evaluate_script(
            "var order = [];
            order.push('sync');
            Promise.resolve().then(() => order.push('microtask'));
            order.push('sync-2');",
        )
        .unwrap();
    let result = context.evaluate_script("order.join(',');").unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("sync,sync-2,microtask".to_string()));
}

#[test]
fn a_rejection_with_no_handler_in_the_chain_propagates_to_the_first_catch() {
    let mut context = ContextBuilder::new().build();
    context
        .evaluate_script(
            "var reason;
            Promise.reject('bad')
                .then(v => v + 1)
                .then(v => v + 1)
                .catch(e => { reason = e; });",
        )
        .unwrap();
    let result = context.evaluate_script("reason;").unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("bad".to_string()));
}

#[test]
fn resolving_with_another_promise_adopts_its_eventual_state() {
    let mut context = ContextBuilder::new().build();
    context
        .evaluate_script(
            "var seen;
            let inner = new Promise(res => res(42));
            let outer = new Promise(res => res(inner));
            outer.then(v => { seen = v; });",
        )
        .unwrap();
    let result = context.evaluate_script("seen;").unwrap();
    assert_eq!(result.as_number(), Some(42.0));
}
