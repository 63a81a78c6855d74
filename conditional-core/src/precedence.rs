//! Evaluation order of precondition fields.
//!
//! RFC 9110 §13.2.2 resolves identity checks (`If-Match`, `If-None-Match`)
//! before modification-time checks (`If-Unmodified-Since`, `If-Modified-Since`),
//! and range negotiation (`If-Range`) last. Fields outside the table are
//! ordered after every known field and keep their relative order.

use std::cmp::Ordering;

/// Known precondition fields in ascending precedence.
pub const PRECEDENCE: [&str; 5] = [
    "if-match",
    "if-unmodified-since",
    "if-none-match",
    "if-modified-since",
    "if-range",
];

/// Returns the position of `field` in [`PRECEDENCE`], ignoring ASCII case.
///
/// `None` means the field is not a standard precondition and sorts last.
pub fn priority(field: &str) -> Option<usize> {
    PRECEDENCE
        .iter()
        .position(|known| known.eq_ignore_ascii_case(field))
}

/// Total order over precondition field names.
///
/// Unknown fields compare equal to each other, so a stable sort keeps them in
/// their original order.
pub fn compare_fields(left: &str, right: &str) -> Ordering {
    let rank = |field: &str| priority(field).unwrap_or(usize::MAX);
    rank(left).cmp(&rank(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_table() {
        assert_eq!(priority("if-match"), Some(0));
        assert_eq!(priority("if-unmodified-since"), Some(1));
        assert_eq!(priority("if-none-match"), Some(2));
        assert_eq!(priority("if-modified-since"), Some(3));
        assert_eq!(priority("if-range"), Some(4));
        assert_eq!(priority("x-precondition"), None);
    }

    #[test]
    fn test_priority_is_case_insensitive() {
        assert_eq!(priority("If-None-Match"), Some(2));
        assert_eq!(priority("IF-RANGE"), Some(4));
    }

    #[test]
    fn test_compare_fields() {
        assert_eq!(compare_fields("if-match", "if-range"), Ordering::Less);
        assert_eq!(
            compare_fields("if-modified-since", "If-Unmodified-Since"),
            Ordering::Greater
        );
        assert_eq!(compare_fields("if-range", "x-custom"), Ordering::Less);
        assert_eq!(compare_fields("x-a", "x-b"), Ordering::Equal);
        assert_eq!(compare_fields("If-Match", "if-match"), Ordering::Equal);
    }

    #[test]
    fn test_sort_is_stable_for_unknown_fields() {
        let mut fields = vec![
            "x-second",
            "if-range",
            "x-first",
            "if-none-match",
            "if-match",
        ];
        fields.sort_by(|a, b| compare_fields(a, b));
        assert_eq!(
            fields,
            vec!["if-match", "if-none-match", "if-range", "x-second", "x-first"]
        );
    }
}
