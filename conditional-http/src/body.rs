//! Response body shared by precondition responses and next-handler responses.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Buf, Bytes};
use http_body::{Body as HttpBody, Frame, SizeHint};
use pin_project::pin_project;

/// A response body produced by the conditional middleware.
///
/// # Variants
///
/// - [`Full`](ConditionalBody::Full): a body built by a precondition
///   (304, 412, 206 or 416), held in memory
/// - [`Passthrough`](ConditionalBody::Passthrough): the next handler's body,
///   forwarded untouched
#[pin_project(project = ConditionalBodyProj)]
#[derive(Debug)]
pub enum ConditionalBody<B> {
    /// In-memory body.
    ///
    /// The `Option` is used to yield the data once, then return `None` on subsequent polls.
    Full(Option<Bytes>),

    /// Body forwarded from the next handler.
    Passthrough(#[pin] B),
}

impl<B> ConditionalBody<B> {
    pub fn full(bytes: Bytes) -> Self {
        if bytes.is_empty() {
            ConditionalBody::Full(None)
        } else {
            ConditionalBody::Full(Some(bytes))
        }
    }

    pub fn empty() -> Self {
        ConditionalBody::Full(None)
    }
}

impl<B> HttpBody for ConditionalBody<B>
where
    B: HttpBody,
{
    type Data = Bytes;
    type Error = B::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        match self.project() {
            ConditionalBodyProj::Full(data) => Poll::Ready(data.take().map(|bytes| Ok(Frame::data(bytes)))),
            ConditionalBodyProj::Passthrough(body) => match body.poll_frame(cx) {
                Poll::Ready(Some(Ok(frame))) => {
                    let frame = frame.map_data(|mut data| data.copy_to_bytes(data.remaining()));
                    Poll::Ready(Some(Ok(frame)))
                }
                Poll::Ready(Some(Err(e))) => Poll::Ready(Some(Err(e))),
                Poll::Ready(None) => Poll::Ready(None),
                Poll::Pending => Poll::Pending,
            },
        }
    }

    fn size_hint(&self) -> SizeHint {
        match self {
            ConditionalBody::Full(Some(bytes)) => SizeHint::with_exact(bytes.len() as u64),
            ConditionalBody::Full(None) => SizeHint::with_exact(0),
            ConditionalBody::Passthrough(body) => body.size_hint(),
        }
    }

    fn is_end_stream(&self) -> bool {
        match self {
            ConditionalBody::Full(data) => data.is_none(),
            ConditionalBody::Passthrough(body) => body.is_end_stream(),
        }
    }
}
