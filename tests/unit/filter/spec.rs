use super::*;

#[test]
fn needs_at_least_two_filters() {
    let one = vec![FilterSpec::parse(Some("a"), "x > 1").unwrap()];
    assert!(matches!(FilterSet::new(one), Err(FramesError::Config(_))));
    assert!(matches!(FilterSet::new(vec![]), Err(FramesError::Config(_))));
}

#[test]
fn rejects_duplicate_names() {
    let filters = vec![
        FilterSpec::parse(Some("a"), "x > 1").unwrap(),
        FilterSpec::parse(Some("a"), "x > 2").unwrap(),
    ];
    let err = FilterSet::new(filters).unwrap_err();
    assert!(err.to_string().contains("duplicate filter name 'a'"));
}

#[test]
fn unnamed_filters_take_their_expression_text() {
    let set = FilterSet::new(vec![
        FilterSpec::parse(None, "  x > 1 ").unwrap(),
        FilterSpec::parse(Some("high"), "x > 10").unwrap(),
    ])
    .unwrap();
    assert_eq!(set.names(), vec!["x > 1", "high"]);
    assert_eq!(set.expressions(), vec!["x > 1", "x > 10"]);
    assert_eq!(set.len(), 2);
}

#[test]
fn bad_expressions_fail_to_parse() {
    assert!(matches!(
        FilterSpec::parse(Some("a"), "x >"),
        Err(FramesError::Expression(_))
    ));
}
