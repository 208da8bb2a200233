use crate::context::ContextBuilder;

#[test]
fn slice_and_char_at_agree_on_the_same_substring() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("'hello'.slice(1, 4);").unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("ell".to_string()));
}

#[test]
fn case_conversion_round_trips_through_the_original_text() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("'Hello'.toUpperCase().toLowerCase();").unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("hello".to_string()));
}

#[test]
fn split_on_a_separator_produces_one_entry_per_piece() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("'a,b,c'.split(',').length;").unwrap();
    assert_eq!(result.as_number(), Some(3.0));
}

#[test]
fn replace_only_touches_the_first_match() {
    let mut context = ContextBuilder::new().build();
    let result = context.evaluate_script("'aaa'.replace('a', 'b');").unwrap();
    assert_eq!(result.as_string().map(|s| s.to_string()), Some("baa".to_string()));
}
