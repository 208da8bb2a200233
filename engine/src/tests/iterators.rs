use crate::context::ContextBuilder;

#[test]
fn for_of_walks_an_array_in_index_order() {
    let mut context = ContextBuilder::new().build();
    let result = context
        .evaluate_script("let sum = 0; for (const v of [1, 2, 3]) { sum += v; } sum;")
        .unwrap();
    assert_eq!(result.as_number(), Some(6.0));
}

#[test]
fn array_destructuring_pulls_from_the_iterator_protocol() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("let [a, b, c] = [10, 20, 30]; a + b + c;").unwrap();
    assert_eq!(result.as_number(), Some(60.0));
}

#[test]
fn array_destructuring_with_a_rest_element_collects_the_remainder() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("let [first, ...rest] = [1, 2, 3]; rest.length;").unwrap();
    assert_eq!(result.as_number(), Some(2.0));
}

#[test]
fn spread_in_a_call_expands_an_array_into_arguments() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("function add(a, b, c) { return a + b + c; } add(...[1, 2, 3]);").unwrap();
    assert_eq!(result.as_number(), Some(6.0));
}

#[test]
fn spread_in_an_array_literal_flattens_one_level() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("[0, ...[1, 2], 3].length;").unwrap();
    assert_eq!(result.as_number(), Some(4.0));
}

#[test]
fn for_of_over_a_custom_iterable_object_honors_symbol_iterator() {
    let mut context = ContextBuilder::new().build();
    let result = context
        .evaluate_script(
            "let obj = {
                [Symbol.iterator]() {
                    let n = 0;
                    return { next() { n += 1; return { value: n, done: n > 3 }; } };
                }
            };
            let seen = [];
            for (const v of obj) { seen.push(v); }
            seen.join(',');",
        )
        .unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("1,2,3".to_string()));
}

#[test]
fn a_labeled_break_exits_an_outer_loop_from_inside_a_for_of() {
    let mut context = ContextBuilder::new().build();
    let result = context
        .evaluate_script(
            "let seen = [];
            outer: for (const a of [1, 2]) {
                for (const b of [10, 20]) {
                    if (b === 20) break outer;
                    seen.push(a + b);
                }
            }
            seen.join(',');",
        )
        .unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("11".to_string()));
}
