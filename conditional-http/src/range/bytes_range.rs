use http_range::{HttpRange, HttpRangeParseError};

use super::{RangeError, RangeSpecifier, SatisfiedRange};

/// The `bytes` range unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesRange;

impl RangeSpecifier for BytesRange {
    fn unit(&self) -> &str {
        "bytes"
    }

    fn satisfy(&self, field_value: &str, length: u64) -> Result<Vec<SatisfiedRange>, RangeError> {
        // `http-range` only accepts a lowercase unit.
        let Some((unit, range_set)) = field_value.trim().split_once('=') else {
            return Err(RangeError::Invalid);
        };
        if !unit.trim().eq_ignore_ascii_case(self.unit()) {
            return Err(RangeError::Invalid);
        }

        let field_value = format!("bytes={range_set}");
        let ranges = HttpRange::parse(&field_value, length).map_err(|error| match error {
            HttpRangeParseError::NoOverlap => RangeError::Unsatisfiable,
            _ => RangeError::Invalid,
        })?;

        if ranges.is_empty() {
            return Err(RangeError::Invalid);
        }

        // A zero-length representation satisfies no range, suffix ranges included.
        let satisfied: Vec<SatisfiedRange> = ranges
            .into_iter()
            .filter(|range| range.length > 0)
            .map(|range| SatisfiedRange {
                start: range.start,
                length: range.length,
            })
            .collect();

        if satisfied.is_empty() {
            Err(RangeError::Unsatisfiable)
        } else {
            Ok(satisfied)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn satisfy(value: &str, length: u64) -> Result<Vec<(u64, u64)>, RangeError> {
        BytesRange
            .satisfy(value, length)
            .map(|ranges| ranges.iter().map(|r| (r.start, r.last())).collect())
    }

    #[test]
    fn test_single_ranges() {
        assert_eq!(satisfy("bytes=0-2", 6), Ok(vec![(0, 2)]));
        assert_eq!(satisfy("bytes=-3", 6), Ok(vec![(3, 5)]));
        assert_eq!(satisfy("bytes=4-", 6), Ok(vec![(4, 5)]));
        assert_eq!(satisfy("bytes=2-100", 6), Ok(vec![(2, 5)]));
        assert_eq!(satisfy("bytes=-100", 6), Ok(vec![(0, 5)]));
    }

    #[test]
    fn test_unit_is_case_insensitive() {
        assert_eq!(satisfy("Bytes=0-1", 6), Ok(vec![(0, 1)]));
        assert_eq!(satisfy("BYTES=-2", 6), Ok(vec![(4, 5)]));
        assert_eq!(satisfy(" bytes =2-3", 6), Ok(vec![(2, 3)]));
    }

    #[test]
    fn test_multiple_ranges_keep_order() {
        assert_eq!(satisfy("bytes=4-, -3", 6), Ok(vec![(4, 5), (3, 5)]));
    }

    #[test]
    fn test_invalid() {
        for value in ["bytes=", "bytes=a-b", "bytes=5-4", "items=0-1", "bytes 0-1"] {
            assert_eq!(satisfy(value, 6), Err(RangeError::Invalid), "{value}");
        }
    }

    #[test]
    fn test_unsatisfiable() {
        assert_eq!(satisfy("bytes=6-", 6), Err(RangeError::Unsatisfiable));
        assert_eq!(satisfy("bytes=10-20", 6), Err(RangeError::Unsatisfiable));
        assert_eq!(satisfy("bytes=-3", 0), Err(RangeError::Unsatisfiable));
    }
}
