//! Adapters implementing [`Upstream`] for Tower services.
//!
//! [`TowerSelector`] calls the representation selection service and buffers
//! its response into a [`Representation`]. [`TowerUpstream`] calls the next
//! handler. Both are used internally by
//! [`ConditionalService`](crate::service::ConditionalService).
//!
//! [`Upstream`]: conditional_core::Upstream

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use conditional::{BoxError, Error};
use conditional_core::Upstream;
use conditional_http::{ConditionalHttpRequest, Representation, SelectionRequest};
use futures::ready;
use http::response::Parts;
use http::{Request, Response};
use http_body::Body as HttpBody;
use http_body_util::BodyExt;
use http_body_util::combinators::Collect;
use pin_project::pin_project;
use tower::Service;
use tower::util::{Oneshot, ServiceExt};
use tracing::debug;

const POLL_AFTER_READY_ERROR: &str = "TowerSelectorFuture can't be polled after finishing";

#[pin_project(project = SelectionStateProj)]
enum SelectionState<F, B>
where
    B: HttpBody,
{
    Calling {
        #[pin]
        call: F,
    },
    Collecting {
        parts: Option<Parts>,
        #[pin]
        body: Collect<B>,
    },
}

/// Future returned by [`TowerSelector::call`].
///
/// Waits for the selection service, then collects the response body.
#[pin_project]
pub struct TowerSelectorFuture<Sel, B>
where
    Sel: Service<SelectionRequest, Response = Response<B>>,
    B: HttpBody,
{
    #[pin]
    state: SelectionState<Oneshot<Sel, SelectionRequest>, B>,
}

impl<Sel, B> TowerSelectorFuture<Sel, B>
where
    Sel: Service<SelectionRequest, Response = Response<B>>,
    B: HttpBody,
{
    /// Creates a future calling `service` once it is ready.
    pub fn new(service: Sel, request: SelectionRequest) -> Self {
        Self {
            state: SelectionState::Calling {
                call: service.oneshot(request),
            },
        }
    }
}

impl<Sel, B> Future for TowerSelectorFuture<Sel, B>
where
    Sel: Service<SelectionRequest, Response = Response<B>>,
    Sel::Error: Into<BoxError>,
    B: HttpBody,
    B::Error: Into<BoxError>,
{
    type Output = Result<Representation, Error>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        loop {
            let state = match this.state.as_mut().project() {
                SelectionStateProj::Calling { call } => match ready!(call.poll(cx)) {
                    Ok(response) => {
                        let (parts, body) = response.into_parts();
                        SelectionState::Collecting {
                            parts: Some(parts),
                            body: body.collect(),
                        }
                    }
                    Err(error) => {
                        let error = Error::selection(error);
                        debug!(%error, "Selection service failed");
                        return Poll::Ready(Err(error));
                    }
                },
                SelectionStateProj::Collecting { parts, body } => {
                    let result = match ready!(body.poll(cx)) {
                        Ok(collected) => {
                            let parts = parts.take().expect(POLL_AFTER_READY_ERROR);
                            let response = Response::from_parts(parts, collected.to_bytes());
                            debug!(status = %response.status(), "Representation selected");
                            Ok(Representation::from_response(response))
                        }
                        Err(error) => {
                            let error = Error::representation_body(error);
                            debug!(%error, "Selected representation body could not be collected");
                            Err(error)
                        }
                    };
                    return Poll::Ready(result);
                }
            };
            this.state.set(state);
        }
    }
}

/// Representation selection backed by a Tower service.
///
/// The service receives the request head without precondition fields. Its
/// response body is collected in full; a failure to do so is reported as
/// [`Error::RepresentationBody`].
#[derive(Clone)]
pub struct TowerSelector<Sel> {
    service: Sel,
}

impl<Sel> TowerSelector<Sel> {
    /// Wraps a selection service.
    pub fn new(service: Sel) -> Self {
        Self { service }
    }
}

impl<Sel> fmt::Debug for TowerSelector<Sel> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TowerSelector").finish_non_exhaustive()
    }
}

impl<Sel, B> Upstream<SelectionRequest> for TowerSelector<Sel>
where
    Sel: Service<SelectionRequest, Response = Response<B>> + Clone + Send,
    Sel::Future: Send,
    Sel::Error: Into<BoxError>,
    B: HttpBody + Send,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    type Response = Result<Representation, Error>;
    type Future = TowerSelectorFuture<Sel, B>;

    fn call(&mut self, req: SelectionRequest) -> Self::Future {
        TowerSelectorFuture::new(self.service.clone(), req)
    }
}

/// The next handler, backed by a Tower service that has already been driven
/// to readiness.
pub struct TowerUpstream<S> {
    service: S,
}

impl<S> TowerUpstream<S> {
    /// Wraps a ready service.
    pub fn new(service: S) -> Self {
        Self { service }
    }
}

impl<S, ReqBody, ResBody> Upstream<ConditionalHttpRequest<ReqBody>> for TowerUpstream<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send,
{
    type Response = Result<Response<ResBody>, S::Error>;
    type Future = S::Future;

    fn call(&mut self, req: ConditionalHttpRequest<ReqBody>) -> Self::Future {
        self.service.call(req.into_request())
    }
}
