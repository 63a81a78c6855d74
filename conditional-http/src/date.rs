//! HTTP-date values.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Error returned when a value is not a valid HTTP-date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid HTTP date: {0:?}")]
pub struct InvalidHttpDate(String);

/// An instant carried by `Last-Modified`, `If-Modified-Since` and friends.
///
/// Parsing accepts the IMF-fixdate form and the obsolete RFC 850 and asctime
/// forms. Values compare as instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HttpDate(DateTime<Utc>);

impl HttpDate {
    /// The instant as a `chrono` date time.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl FromStr for HttpDate {
    type Err = InvalidHttpDate;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        httpdate::parse_http_date(value.trim())
            .map(|time| HttpDate(DateTime::<Utc>::from(time)))
            .map_err(|_| InvalidHttpDate(value.to_owned()))
    }
}

impl fmt::Display for HttpDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%a, %d %b %Y %H:%M:%S GMT"))
    }
}

impl From<DateTime<Utc>> for HttpDate {
    fn from(value: DateTime<Utc>) -> Self {
        HttpDate(value)
    }
}

impl From<SystemTime> for HttpDate {
    fn from(value: SystemTime) -> Self {
        HttpDate(DateTime::<Utc>::from(value))
    }
}

impl From<HttpDate> for DateTime<Utc> {
    fn from(value: HttpDate) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_all_formats_parse_to_same_instant() {
        let expected = HttpDate::from(Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap());

        for value in [
            "Sun, 06 Nov 1994 08:49:37 GMT",
            "Sunday, 06-Nov-94 08:49:37 GMT",
            "Sun Nov  6 08:49:37 1994",
            "  Sun, 06 Nov 1994 08:49:37 GMT ",
        ] {
            assert_eq!(value.parse::<HttpDate>().unwrap(), expected, "{value}");
        }
    }

    #[test]
    fn test_invalid() {
        assert!("yesterday".parse::<HttpDate>().is_err());
        assert!("".parse::<HttpDate>().is_err());
    }

    #[test]
    fn test_ordering_and_display() {
        let earlier: HttpDate = "Sat, 01 Jan 2000 00:00:00 GMT".parse().unwrap();
        let later: HttpDate = "Sat, 01 Jan 2000 00:00:01 GMT".parse().unwrap();

        assert!(earlier < later);
        assert_eq!(earlier.to_string(), "Sat, 01 Jan 2000 00:00:00 GMT");
    }
}
