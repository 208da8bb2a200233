use crate::context::ContextBuilder;

#[test]
fn push_and_pop_track_length() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("let a = [1, 2]; a.push(3); a.pop(); a.length;").unwrap();
    assert_eq!(result.as_number(), Some(2.0));
}

#[test]
fn map_then_filter_composes() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("[1, 2, 3, 4].map(x => x * 2).filter(x => x > 4).length;").unwrap();
    assert_eq!(result.as_number(), Some(2.0));
}

#[test]
fn reduce_sums_with_an_initial_value() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("[1, 2, 3].reduce((acc, x) => acc + x, 0);").unwrap();
    assert_eq!(result.as_number(), Some(6.0));
}

#[test]
fn join_uses_the_given_separator() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("[1, 2, 3].join('-');").unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("1-2-3".to_string()));
}
