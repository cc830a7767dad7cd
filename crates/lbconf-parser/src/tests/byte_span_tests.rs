use crate::ByteSpan;

#[test]
fn len_is_end_minus_start() {
    let span = ByteSpan::new(5, 15);
    assert_eq!(span.len(), 10);
}

#[test]
fn zero_width_span_is_empty() {
    let span = ByteSpan::new(42, 42);
    assert_eq!(span.len(), 0);
    assert!(span.is_empty());
}

#[test]
fn non_empty_span_reports_start_and_end() {
    let span = ByteSpan::new(3, 9);
    assert_eq!(span.start(), 3);
    assert_eq!(span.end(), 9);
    assert!(!span.is_empty());
}
