//! Header families and field-value helpers.

use std::borrow::Cow;

use http::header::{
    ACCEPT_RANGES, AsHeaderName, CONTENT_ENCODING, CONTENT_LANGUAGE, CONTENT_LENGTH, CONTENT_TYPE,
    ETAG, IF_MATCH, IF_MODIFIED_SINCE, IF_NONE_MATCH, IF_RANGE, IF_UNMODIFIED_SINCE,
    LAST_MODIFIED,
};
use http::{HeaderMap, HeaderName, Request, Response};

/// The five standard precondition fields.
pub static CONDITIONAL_HEADERS: [HeaderName; 5] = [
    IF_MATCH,
    IF_NONE_MATCH,
    IF_MODIFIED_SINCE,
    IF_UNMODIFIED_SINCE,
    IF_RANGE,
];

/// Representation metadata, never sent with a 412 response.
pub static REPRESENTATION_HEADERS: [HeaderName; 6] = [
    ETAG,
    LAST_MODIFIED,
    CONTENT_TYPE,
    CONTENT_LENGTH,
    CONTENT_ENCODING,
    CONTENT_LANGUAGE,
];

/// Content metadata, never sent with a 304 response.
pub static CONTENT_HEADERS: [HeaderName; 4] = [
    CONTENT_ENCODING,
    CONTENT_LANGUAGE,
    CONTENT_LENGTH,
    CONTENT_TYPE,
];

/// Trait for extracting headers from a request, response or representation.
pub trait HasHeaders {
    /// The header map.
    fn headers(&self) -> &HeaderMap;

    /// The combined value of every `name` line, joined with `", "`.
    ///
    /// `None` if the field is absent or any line is not visible ASCII.
    fn field_value<K>(&self, name: K) -> Option<Cow<'_, str>>
    where
        K: AsHeaderName,
    {
        let mut values = self.headers().get_all(name).iter();
        let first = values.next()?.to_str().ok()?;
        let rest = values
            .map(|value| value.to_str())
            .collect::<Result<Vec<_>, _>>()
            .ok()?;

        if rest.is_empty() {
            Some(Cow::Borrowed(first))
        } else {
            let mut combined = first.to_owned();
            for value in rest {
                combined.push_str(", ");
                combined.push_str(value);
            }
            Some(Cow::Owned(combined))
        }
    }
}

impl HasHeaders for HeaderMap {
    fn headers(&self) -> &HeaderMap {
        self
    }
}

impl<B> HasHeaders for Request<B> {
    fn headers(&self) -> &HeaderMap {
        Request::headers(self)
    }
}

impl<B> HasHeaders for Response<B> {
    fn headers(&self) -> &HeaderMap {
        Response::headers(self)
    }
}

/// Returns `true` for one of the five standard precondition fields.
pub fn is_conditional_header(name: &HeaderName) -> bool {
    CONDITIONAL_HEADERS.contains(name)
}

/// Copies `headers` without any of the `excluded` fields.
pub fn without(headers: &HeaderMap, excluded: &[HeaderName]) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| !excluded.contains(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Splits a comma-separated list, trimming elements and skipping empty ones.
///
/// Commas inside double quotes do not split.
pub fn split_list(value: &str) -> impl Iterator<Item = &str> {
    let mut quoted = false;
    value
        .split(move |c: char| {
            if c == '"' {
                quoted = !quoted;
            }
            c == ',' && !quoted
        })
        .map(str::trim)
        .filter(|element| !element.is_empty())
}

/// Whether `Accept-Ranges` explicitly advertises no range support.
///
/// A malformed field is treated as not advertising `none`.
pub fn accepts_no_ranges(headers: &HeaderMap) -> bool {
    let Some(value) = headers.field_value(ACCEPT_RANGES) else {
        return false;
    };

    let units: Vec<&str> = split_list(&value).collect();
    units.iter().all(|unit| unit.bytes().all(is_tchar))
        && units.iter().any(|unit| unit.eq_ignore_ascii_case("none"))
}

fn is_tchar(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    #[test]
    fn test_field_value_combines_lines() {
        let mut headers = HeaderMap::new();
        assert_eq!(headers.field_value(IF_MATCH), None);

        headers.append(IF_MATCH, HeaderValue::from_static("\"a\""));
        assert_eq!(headers.field_value(IF_MATCH).as_deref(), Some("\"a\""));

        headers.append(IF_MATCH, HeaderValue::from_static("\"b\""));
        assert_eq!(
            headers.field_value("If-Match").as_deref(),
            Some("\"a\", \"b\"")
        );
    }

    #[test]
    fn test_split_list() {
        let elements: Vec<&str> = split_list(" a ,, \"b,c\" ,d,").collect();
        assert_eq!(elements, vec!["a", "\"b,c\"", "d"]);
        assert_eq!(split_list(" , ").count(), 0);
    }

    #[test]
    fn test_without() {
        let mut headers = HeaderMap::new();
        headers.insert(ETAG, HeaderValue::from_static("\"a\""));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        headers.insert("x-custom", HeaderValue::from_static("1"));

        let filtered = without(&headers, &REPRESENTATION_HEADERS);
        assert_eq!(filtered.len(), 1);
        assert!(filtered.contains_key("x-custom"));

        let filtered = without(&headers, &CONTENT_HEADERS);
        assert!(filtered.contains_key(ETAG));
        assert!(!filtered.contains_key(CONTENT_TYPE));
    }

    #[test]
    fn test_accepts_no_ranges() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_no_ranges(&headers));

        headers.insert(ACCEPT_RANGES, HeaderValue::from_static("bytes"));
        assert!(!accepts_no_ranges(&headers));

        headers.insert(ACCEPT_RANGES, HeaderValue::from_static("None"));
        assert!(accepts_no_ranges(&headers));

        headers.insert(ACCEPT_RANGES, HeaderValue::from_static("none, \"bad\""));
        assert!(!accepts_no_ranges(&headers));
    }
}
