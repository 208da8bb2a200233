use crate::context::ContextBuilder;

#[test]
fn break_exits_a_while_loop_immediately() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("let i = 0; while (true) { i++; if (i === 3) break; } i;").unwrap();
    assert_eq!(result.as_number(), Some(3.0));
}

#[test]
fn continue_skips_the_rest_of_the_current_iteration() {
    let mut context = ContextBuilder::new().build();
    let result = context
        .evaluate_script("let sum = 0; for (let i = 0; i < 5; i++) { if (i % 2 === 0) continue; sum += i; } sum;")
        .unwrap();
    assert_eq!(result.as_number(), Some(4.0));
}

#[test]
fn do_while_runs_its_body_at_least_once() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("let n = 0; do { n++; } while (false); n;").unwrap();
    assert_eq!(result.as_number(), Some(1.0));
}

#[test]
fn for_in_enumerates_own_and_inherited_string_keys() {
    let mut context = ContextBuilder::new().build();
    let result = context
        .evaluate_script(
            "function Base() {} Base.prototype.inherited = 1;
            let obj = new Base(); obj.own = 2;
            let keys = [];
            for (const k in obj) { keys.push(k); }
            keys.join(',');",
        )
        .unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("own,inherited".to_string()));
}

#[test]
fn a_labeled_continue_advances_the_labeled_loop_not_the_inner_one() {
    let mut context = ContextBuilder::new().build();
    let result = context
        .evaluate_script(
            "let seen = [];
            outer: for (let a = 0; a < 3; a++) {
                for (let b = 0; b < 3; b++) {
                    if (b === 1) continue outer;
                    seen.push(a * 10 + b);
                }
            }
            seen.join(',');",
        )
        .unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("0,10,20".to_string()));
}
