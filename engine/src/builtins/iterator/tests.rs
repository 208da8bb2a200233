use crate::context::ContextBuilder;

#[test]
fn array_values_iterator_reports_done_after_the_last_element() {
    let mut context = ContextBuilder::new().build();
    let result = context
        .evaluate_script("let it = [1, 2].values(); it.next(); it.next(); it.next().done;")
        .unwrap();
    assert_eq!(result.to_boolean(), true);
}

#[test]
fn array_values_iterator_yields_elements_in_order() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("let it = ['a', 'b'].values(); it.next().value + it.next().value;").unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("ab".to_string()));
}

#[test]
fn an_iterator_is_itself_iterable_via_symbol_iterator() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("let it = [1].values(); it[Symbol.iterator]() === it;").unwrap();
    assert_eq!(result.to_boolean(), true);
}
