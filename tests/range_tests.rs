use pixivdl::errors::AppError;
use pixivdl::resolve::{PageRange, resolve_page_range};

#[test]
fn start_defaults_to_one_and_end_to_zero() {
    let range = resolve_page_range(None, None, None, 0).unwrap();
    assert_eq!(range, PageRange { start: 1, end: 0 });
}

#[test]
fn end_falls_back_to_count_then_config_default() {
    let range = resolve_page_range(None, None, Some(7), 3).unwrap();
    assert_eq!(range, PageRange { start: 1, end: 7 });

    let range = resolve_page_range(None, None, None, 3).unwrap();
    assert_eq!(range, PageRange { start: 1, end: 3 });
}

#[test]
fn explicit_end_takes_priority_over_count() {
    let range = resolve_page_range(Some("2"), Some("5"), Some(9), 3).unwrap();
    assert_eq!(range, PageRange { start: 2, end: 5 });
}

#[test]
fn smaller_end_is_reinterpreted_as_page_count() {
    let range = resolve_page_range(Some("5"), Some("2"), None, 0).unwrap();
    assert_eq!(range, PageRange { start: 5, end: 7 });
}

#[test]
fn unbounded_end_is_preserved() {
    let range = resolve_page_range(Some("1"), Some("0"), None, 0).unwrap();
    assert_eq!(range, PageRange { start: 1, end: 0 });

    // The count tie-break never applies to an unbounded end.
    let range = resolve_page_range(Some("9"), Some("0"), None, 0).unwrap();
    assert_eq!(range, PageRange { start: 9, end: 0 });
}

#[test]
fn tiebreak_sum_overflow_is_a_validation_error() {
    assert!(matches!(
        resolve_page_range(Some("4294967295"), Some("1"), None, 0),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn malformed_integers_are_validation_errors() {
    assert!(matches!(
        resolve_page_range(Some("abc"), None, None, 0),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        resolve_page_range(Some("1"), Some("x"), None, 0),
        Err(AppError::Validation(_))
    ));
}
