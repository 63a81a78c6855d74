//! Range computation for `If-Range` handoff.
//!
//! [`with_content_range`] turns the selected representation into one of:
//!
//! - `206 Partial Content` with a single `Content-Range`
//! - `206 Partial Content` with a `multipart/byteranges` body
//! - `416 Range Not Satisfiable` with `Content-Range: <unit> */<length>`, for
//!   an unsupported unit or ranges outside the representation
//! - the representation unchanged, when the `Range` field has no unit or does
//!   not follow its unit's grammar

mod bytes_range;
mod multipart;

use std::sync::Arc;

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_RANGE, HeaderValue};
use http::{HeaderMap, HeaderName, Response, StatusCode};
use thiserror::Error;
use tracing::debug;

use crate::Representation;
use crate::header::{CONTENT_HEADERS, HasHeaders, without};

pub use bytes_range::BytesRange;

/// Why a `Range` field could not be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    /// The field does not follow the unit's grammar.
    #[error("invalid range")]
    Invalid,
    /// No range overlaps the representation.
    #[error("range not satisfiable")]
    Unsatisfiable,
}

/// A satisfied range: `length` bytes starting at offset `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SatisfiedRange {
    pub start: u64,
    pub length: u64,
}

impl SatisfiedRange {
    /// Offset of the last byte, inclusive.
    pub fn last(&self) -> u64 {
        self.start + self.length.saturating_sub(1)
    }

    fn slice(&self, body: &Bytes) -> Bytes {
        let start = self.start as usize;
        body.slice(start..start + self.length as usize)
    }
}

/// A range unit the server knows how to satisfy.
pub trait RangeSpecifier {
    /// The range unit, e.g. `bytes`.
    fn unit(&self) -> &str;

    /// Resolves the complete `Range` field value against a representation of
    /// `length` units.
    fn satisfy(&self, field_value: &str, length: u64) -> Result<Vec<SatisfiedRange>, RangeError>;
}

/// A range specifier shared between requests.
pub type SharedRangeSpecifier = Arc<dyn RangeSpecifier + Send + Sync>;

impl<T> RangeSpecifier for Arc<T>
where
    T: RangeSpecifier + ?Sized,
{
    fn unit(&self) -> &str {
        self.as_ref().unit()
    }

    fn satisfy(&self, field_value: &str, length: u64) -> Result<Vec<SatisfiedRange>, RangeError> {
        self.as_ref().satisfy(field_value, length)
    }
}

/// Builds the response for a `Range` request against `representation`.
pub fn with_content_range<R>(
    representation: &Representation,
    field_value: &str,
    specifiers: &[R],
) -> Response<Bytes>
where
    R: RangeSpecifier,
{
    let Some(unit) = range_unit(field_value) else {
        debug!(range = field_value, "Range without unit, serving full representation");
        return representation.to_response();
    };

    let length = representation.body().len() as u64;

    let Some(specifier) = specifiers
        .iter()
        .find(|specifier| specifier.unit().eq_ignore_ascii_case(unit))
    else {
        debug!(unit, "Unsupported range unit");
        return not_satisfiable(representation, unit, length);
    };

    match specifier.satisfy(field_value, length) {
        Ok(ranges) => {
            let ranges = within(ranges, length);
            match ranges.as_slice() {
                [] => not_satisfiable(representation, specifier.unit(), length),
                [range] => single_part(representation, specifier.unit(), *range, length),
                _ => multipart::multipart(representation, specifier.unit(), &ranges, length),
            }
        }
        Err(RangeError::Invalid) => {
            debug!(range = field_value, "Invalid range, serving full representation");
            representation.to_response()
        }
        Err(RangeError::Unsatisfiable) => {
            not_satisfiable(representation, specifier.unit(), length)
        }
    }
}

/// The unit of a `<unit>=<range-set>` field, if it has that shape.
fn range_unit(field_value: &str) -> Option<&str> {
    let (unit, _) = field_value.split_once('=')?;
    let unit = unit.trim();
    let is_token = !unit.is_empty()
        && unit
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b));
    is_token.then_some(unit)
}

/// Clamps ranges to the representation and drops the ones outside it.
fn within(ranges: Vec<SatisfiedRange>, length: u64) -> Vec<SatisfiedRange> {
    ranges
        .into_iter()
        .filter(|range| range.start < length)
        .map(|range| SatisfiedRange {
            start: range.start,
            length: range.length.min(length - range.start),
        })
        .filter(|range| range.length > 0)
        .collect()
}

fn not_satisfiable(representation: &Representation, unit: &str, length: u64) -> Response<Bytes> {
    let mut headers = without(representation.headers(), &CONTENT_HEADERS);
    insert(&mut headers, CONTENT_RANGE, format!("{unit} */{length}"));
    representation.response(StatusCode::RANGE_NOT_SATISFIABLE, headers, Bytes::new())
}

fn single_part(
    representation: &Representation,
    unit: &str,
    range: SatisfiedRange,
    length: u64,
) -> Response<Bytes> {
    let mut headers = representation.headers().clone();
    insert(
        &mut headers,
        CONTENT_RANGE,
        format!("{unit} {}-{}/{length}", range.start, range.last()),
    );
    headers.insert(CONTENT_LENGTH, HeaderValue::from(range.length));

    let body = range.slice(representation.body());
    representation.response(StatusCode::PARTIAL_CONTENT, headers, body)
}

pub(crate) fn insert(headers: &mut HeaderMap, name: HeaderName, value: String) {
    match HeaderValue::try_from(value) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(error) => debug!(%error, "Dropping unrepresentable header value"),
    }
}
