use bytes::Bytes;
use conditional_core::SelectedRepresentation;
use http::header::{ETAG, LAST_MODIFIED};
use http::{HeaderMap, HeaderName, Response, StatusCode, Version};

use crate::header::{self, HasHeaders};

/// The selected representation of the target resource.
///
/// A read-only snapshot of the response produced by representation selection:
/// status, headers and the fully collected body.
#[derive(Debug, Clone)]
pub struct Representation {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    body: Bytes,
}

impl Representation {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            version: Version::default(),
            headers,
            body,
        }
    }

    pub fn from_response(response: Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            status: parts.status,
            version: parts.version,
            headers: parts.headers,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The raw `ETag` field, if present and readable.
    pub fn etag(&self) -> Option<&str> {
        self.headers.get(ETAG)?.to_str().ok()
    }

    /// The raw `Last-Modified` field, if present and readable.
    pub fn last_modified(&self) -> Option<&str> {
        self.headers.get(LAST_MODIFIED)?.to_str().ok()
    }

    /// Whether `Accept-Ranges` explicitly advertises `none`.
    pub fn accepts_no_ranges(&self) -> bool {
        header::accepts_no_ranges(&self.headers)
    }

    /// The representation as a complete response.
    pub fn to_response(&self) -> Response<Bytes> {
        self.response(self.status, self.headers.clone(), self.body.clone())
    }

    /// An empty-bodied response carrying the representation's headers minus `excluded`.
    pub fn to_empty_response(&self, status: StatusCode, excluded: &[HeaderName]) -> Response<Bytes> {
        self.response(status, header::without(&self.headers, excluded), Bytes::new())
    }

    pub(crate) fn response(
        &self,
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
    ) -> Response<Bytes> {
        let mut response = Response::new(body);
        *response.status_mut() = status;
        *response.version_mut() = self.version;
        *response.headers_mut() = headers;
        response
    }
}

impl From<Response<Bytes>> for Representation {
    fn from(response: Response<Bytes>) -> Self {
        Representation::from_response(response)
    }
}

impl HasHeaders for Representation {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl SelectedRepresentation for Representation {
    fn is_pre_evaluable(&self) -> bool {
        self.status.is_success() || self.status == StatusCode::PRECONDITION_FAILED
    }
}
