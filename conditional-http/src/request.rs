use bytes::Bytes;
use conditional_core::ConditionalRequest;
use http::{HeaderMap, Method, Request, request::Parts};
use http_body_util::Empty;

use crate::header::{HasHeaders, is_conditional_header};

/// Request sent to representation selection: the original head, no body.
pub type SelectionRequest = Request<Empty<Bytes>>;

/// Returns `true` for GET and HEAD.
pub fn is_retrieval(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD
}

/// An HTTP request evaluated against preconditions.
///
/// The body is carried through untouched and handed back by
/// [`into_request`](Self::into_request) when the request is forwarded.
#[derive(Debug)]
pub struct ConditionalHttpRequest<B> {
    parts: Parts,
    body: B,
}

impl<B> ConditionalHttpRequest<B> {
    pub fn from_request(request: Request<B>) -> Self {
        let (parts, body) = request.into_parts();
        Self { parts, body }
    }

    pub fn into_request(self) -> Request<B> {
        Request::from_parts(self.parts, self.body)
    }

    pub fn parts(&self) -> &Parts {
        &self.parts
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn into_parts(self) -> (Parts, B) {
        (self.parts, self.body)
    }
}

impl<B> From<Request<B>> for ConditionalHttpRequest<B> {
    fn from(request: Request<B>) -> Self {
        Self::from_request(request)
    }
}

impl<B> HasHeaders for ConditionalHttpRequest<B> {
    fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }
}

impl<B> ConditionalRequest for ConditionalHttpRequest<B> {
    type Head = SelectionRequest;

    fn ignores_preconditions(&self) -> bool {
        [Method::CONNECT, Method::OPTIONS, Method::TRACE].contains(self.method())
    }

    fn has_field(&self, field: &str) -> bool {
        self.parts.headers.contains_key(field)
    }

    fn without_fields<'a, I>(&self, fields: I) -> Self::Head
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields.into_iter().collect();
        let headers: HeaderMap = self
            .parts
            .headers
            .iter()
            .filter(|(name, _)| {
                !is_conditional_header(name)
                    && !fields
                        .iter()
                        .any(|field| name.as_str().eq_ignore_ascii_case(field))
            })
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        let mut head = Request::new(Empty::new());
        *head.method_mut() = self.parts.method.clone();
        *head.uri_mut() = self.parts.uri.clone();
        *head.version_mut() = self.parts.version;
        *head.headers_mut() = headers;
        *head.extensions_mut() = self.parts.extensions.clone();
        head
    }
}


#[cfg(test)]
mod tests {
    use http::header::{IF_MATCH, IF_RANGE, RANGE};

    use super::*;

    #[test]
    fn test_ignored_methods() {
        for method in [Method::CONNECT, Method::OPTIONS, Method::TRACE] {
            let request = ConditionalHttpRequest::from_request(
                Request::builder().method(method).body(()).unwrap(),
            );
            assert!(request.ignores_preconditions());
        }
        for method in [Method::GET, Method::HEAD, Method::PUT, Method::DELETE] {
            let request = ConditionalHttpRequest::from_request(
                Request::builder().method(method).body(()).unwrap(),
            );
            assert!(!request.ignores_preconditions());
        }
    }

    #[test]
    fn test_has_field_is_case_insensitive() {
        let request = ConditionalHttpRequest::from_request(
            Request::builder()
                .header("If-None-Match", "*")
                .body(())
                .unwrap(),
        );
        assert!(request.has_field("if-none-match"));
        assert!(request.has_field("IF-NONE-MATCH"));
        assert!(!request.has_field("if-match"));
        assert!(!request.has_field("not a header"));
    }

    #[test]
    fn test_without_fields_strips_preconditions_only() {
        let request: ConditionalHttpRequest<_> = Request::builder()
            .method(Method::PUT)
            .uri("/resource?x=1")
            .header(IF_MATCH, "\"a\"")
            .header(IF_RANGE, "\"a\"")
            .header(RANGE, "bytes=0-1")
            .header("x-if-tenant", "t1")
            .header("accept", "text/plain")
            .extension(7u8)
            .body("payload")
            .unwrap()
            .into();

        let head = request.without_fields(["X-If-Tenant"]);

        assert_eq!(head.method(), Method::PUT);
        assert_eq!(head.uri(), "/resource?x=1");
        assert_eq!(head.extensions().get::<u8>(), Some(&7));
        assert!(!head.headers().contains_key(IF_MATCH));
        assert!(!head.headers().contains_key(IF_RANGE));
        assert!(!head.headers().contains_key("x-if-tenant"));
        assert!(head.headers().contains_key(RANGE));
        assert_eq!(head.headers()["accept"], "text/plain");

        let request = request.into_request();
        assert!(request.headers().contains_key(IF_MATCH));
        assert_eq!(*request.body(), "payload");
    }
}
