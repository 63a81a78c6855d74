use bytes::{BufMut, Bytes, BytesMut};
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderValue};
use http::{Response, StatusCode};

use super::{SatisfiedRange, insert};
use crate::Representation;
use crate::header::{CONTENT_HEADERS, HasHeaders, without};

const BOUNDARY_LEN: usize = 32;

/// Builds a `206` response with a `multipart/byteranges` body, one part per range.
pub(super) fn multipart(
    representation: &Representation,
    unit: &str,
    ranges: &[SatisfiedRange],
    length: u64,
) -> Response<Bytes> {
    let boundary = boundary();
    let content_type = representation.headers().get(CONTENT_TYPE);
    let source = representation.body();

    let mut body = BytesMut::new();
    for range in ranges {
        body.put_slice(b"--");
        body.put_slice(boundary.as_bytes());
        body.put_slice(b"\r\n");
        if let Some(content_type) = content_type {
            body.put_slice(b"Content-Type: ");
            body.put_slice(content_type.as_bytes());
            body.put_slice(b"\r\n");
        }
        body.put_slice(
            format!(
                "Content-Range: {unit} {}-{}/{length}\r\n\r\n",
                range.start,
                range.last()
            )
            .as_bytes(),
        );
        body.put(range.slice(source));
        body.put_slice(b"\r\n");
    }
    body.put_slice(b"--");
    body.put_slice(boundary.as_bytes());
    body.put_slice(b"--");
    let body = body.freeze();

    let mut headers = without(representation.headers(), &CONTENT_HEADERS);
    insert(
        &mut headers,
        CONTENT_TYPE,
        format!("multipart/byteranges; boundary={boundary}"),
    );
    headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));

    representation.response(StatusCode::PARTIAL_CONTENT, headers, body)
}

fn boundary() -> String {
    std::iter::repeat_with(fastrand::alphanumeric)
        .take(BOUNDARY_LEN)
        .collect()
}
