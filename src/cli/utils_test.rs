//! Tests for CLI utilities.

use crate::cli::utils::truncate_with_ellipsis;

#[test]
fn test_truncate_short_string_unchanged() {
    assert_eq!(truncate_with_ellipsis("short", 10), "short");
}

#[test]
fn test_truncate_long_string() {
    let truncated = truncate_with_ellipsis("a very long issue title that goes on", 10);
    assert_eq!(truncated, "a very ...");
    assert_eq!(truncated.chars().count(), 10);
}

#[test]
fn test_truncate_exact_length_unchanged() {
    assert_eq!(truncate_with_ellipsis("1234567890", 10), "1234567890");
}
