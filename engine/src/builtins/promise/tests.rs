use crate::context::ContextBuilder;

#[test]
fn resolve_then_chain_runs_through_the_job_queue() {
    let mut context = ContextBuilder::new().build();
    context
        .evaluate_script("var seen; Promise.resolve(1).then(v => v + 1).then(v => { seen = v * 10; });")
        .unwrap();
    let result = context.evaluate_script("seen;").unwrap();
    assert_eq!(result.as_number(), Some(20.0));
}

#[test]
fn executor_reject_reaches_catch() {
    let mut context = ContextBuilder::new().build();
    context
        .evaluate_script("var caught; new Promise((res, rej) => rej('no')).catch(r => { caught = r; });")
        .unwrap();
    let result = context.evaluate_script("caught;").unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("no".to_string()));
}

#[test]
fn executor_throw_rejects_the_promise() {
    let mut context = ContextBuilder::new().build();
    context
        .evaluate_script("var caught; new Promise(() => { throw 'boom'; }).catch(r => { caught = r; });")
        .unwrap();
    let result = context.evaluate_script("caught;").unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("boom".to_string()));
}

#[test]
fn finally_runs_without_changing_the_resolved_value() {
    let mut context = ContextBuilder::new().build();
    context
        .evaluate_script("var ran = false, value; Promise.resolve(5).finally(() => { ran = true; }).then(v => { value = v; });")
        .unwrap();
    assert_eq!(context.evaluate_script("ran;").unwrap().to_boolean(), true);
    assert_eq!(context.evaluate_script("value;").unwrap().as_number(), Some(5.0));
}
