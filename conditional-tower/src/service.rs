use std::task::{Context, Poll};

use bytes::Bytes;
use conditional::{BoxError, ConditionalFuture};
use conditional_core::{Precondition, PreconditionSet};
use conditional_http::{
    ConditionalBody, ConditionalHttpRequest, HttpPrecondition, Representation, SelectionRequest,
};
use http::{Request, Response};
use http_body::Body as HttpBody;
use tower::Service;

use crate::future::ConditionalServiceFuture;
use crate::upstream::{TowerSelector, TowerUpstream};

/// Tower service evaluating preconditions before calling the wrapped service.
///
/// Created by the [`Conditional`](crate::Conditional) layer.
pub struct ConditionalService<S, Sel, P = HttpPrecondition> {
    upstream: S,
    selector: Sel,
    preconditions: PreconditionSet<P>,
}

impl<S, Sel, P> ConditionalService<S, Sel, P> {
    /// Creates the service from its parts.
    pub fn new(upstream: S, selector: Sel, preconditions: PreconditionSet<P>) -> Self {
        ConditionalService {
            upstream,
            selector,
            preconditions,
        }
    }
}

impl<S, Sel, P> Clone for ConditionalService<S, Sel, P>
where
    S: Clone,
    Sel: Clone,
{
    fn clone(&self) -> Self {
        Self {
            upstream: self.upstream.clone(),
            selector: self.selector.clone(),
            preconditions: self.preconditions.clone(),
        }
    }
}

impl<S, Sel, P, ReqBody, ResBody, SelBody> Service<Request<ReqBody>>
    for ConditionalService<S, Sel, P>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone,
    S::Future: Send,
    Sel: Service<SelectionRequest, Response = Response<SelBody>> + Clone + Send,
    Sel::Future: Send,
    Sel::Error: Into<BoxError>,
    SelBody: HttpBody + Send,
    SelBody::Data: Send,
    SelBody::Error: Into<BoxError>,
    P: Precondition<
            ConditionalHttpRequest<ReqBody>,
            Representation = Representation,
            Response = Response<Bytes>,
        >,
{
    type Response = Response<ConditionalBody<ResBody>>;
    type Error = S::Error;
    type Future = ConditionalServiceFuture<
        ConditionalFuture<ConditionalHttpRequest<ReqBody>, P, TowerSelector<Sel>, TowerUpstream<S>>,
        ResBody,
        S::Error,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.upstream.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // Hand the instance driven by `poll_ready` to the request, keep a fresh clone.
        let clone = self.upstream.clone();
        let upstream = std::mem::replace(&mut self.upstream, clone);

        let conditional_future = ConditionalFuture::new(
            ConditionalHttpRequest::from_request(req),
            self.preconditions.clone(),
            TowerSelector::new(self.selector.clone()),
            TowerUpstream::new(upstream),
        );

        ConditionalServiceFuture::new(conditional_future)
    }
}
