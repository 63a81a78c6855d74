use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use conditional::{EvaluationContext, Resolution};
use conditional_http::ConditionalBody;
use futures::ready;
use http::Response;
use pin_project::pin_project;

/// Wrapper future turning the orchestrator output into an HTTP response.
///
/// Precondition responses become [`ConditionalBody::Full`], next-handler
/// responses [`ConditionalBody::Passthrough`]. The [`EvaluationContext`] is
/// attached to the response extensions.
#[pin_project]
pub struct ConditionalServiceFuture<F, ResBody, E>
where
    F: Future<
        Output = (
            Resolution<Response<Bytes>, Result<Response<ResBody>, E>>,
            EvaluationContext,
        ),
    >,
{
    #[pin]
    inner: F,
}

impl<F, ResBody, E> ConditionalServiceFuture<F, ResBody, E>
where
    F: Future<
        Output = (
            Resolution<Response<Bytes>, Result<Response<ResBody>, E>>,
            EvaluationContext,
        ),
    >,
{
    /// Wraps the orchestrator future.
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F, ResBody, E> Future for ConditionalServiceFuture<F, ResBody, E>
where
    F: Future<
        Output = (
            Resolution<Response<Bytes>, Result<Response<ResBody>, E>>,
            EvaluationContext,
        ),
    >,
{
    type Output = Result<Response<ConditionalBody<ResBody>>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let (resolution, context) = ready!(this.inner.poll(cx));

        let response = match resolution {
            Resolution::Responded(response) => Ok(response.map(ConditionalBody::full)),
            Resolution::Forwarded(result) => {
                result.map(|response| response.map(ConditionalBody::Passthrough))
            }
        };

        Poll::Ready(response.map(|mut response| {
            response.extensions_mut().insert(context);
            response
        }))
    }
}
