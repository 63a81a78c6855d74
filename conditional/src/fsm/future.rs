use std::{
    future::Future,
    pin::Pin,
    task::{self, Poll},
};

use conditional_core::{
    ConditionalRequest, Field, Precondition, PreconditionSet, SelectedRepresentation, Upstream,
    apply,
};
use futures::ready;
use pin_project::pin_project;
use smol_str::SmolStr;
use tracing::{debug, warn};

use crate::{
    BypassReason, Error, EvaluationContext, Outcome, Resolution,
    fsm::{State, states::StateProj},
};

const POLL_AFTER_READY_ERROR: &str = "ConditionalFuture can't be polled after finishing";
const SELECTOR_TAKEN_ERROR: &str = "Selector already taken";
const NEXT_TAKEN_ERROR: &str = "Next handler already taken";

type Output<Req, P, N> = Resolution<
    <P as Precondition<Req>>::Response,
    <N as Upstream<Req>>::Response,
>;

/// Future driving one conditional request to completion.
///
/// Resolves to the response and the [`EvaluationContext`] describing how it was
/// obtained. The selector and the next handler are each called at most once.
#[pin_project(project = ConditionalFutureProj)]
pub struct ConditionalFuture<Req, P, S, N>
where
    Req: ConditionalRequest,
    P: Precondition<Req>,
    S: Upstream<Req::Head, Response = Result<P::Representation, Error>>,
    N: Upstream<Req>,
{
    request: Option<Req>,
    preconditions: PreconditionSet<P>,
    selector: Option<S>,
    next: Option<N>,
    context: EvaluationContext,
    #[pin]
    state: State<S::Future, N::Future, Output<Req, P, N>>,
}

impl<Req, P, S, N> ConditionalFuture<Req, P, S, N>
where
    Req: ConditionalRequest,
    P: Precondition<Req>,
    S: Upstream<Req::Head, Response = Result<P::Representation, Error>>,
    N: Upstream<Req>,
{
    /// Creates the future; nothing happens until it is polled.
    pub fn new(request: Req, preconditions: PreconditionSet<P>, selector: S, next: N) -> Self {
        ConditionalFuture {
            request: Some(request),
            preconditions,
            selector: Some(selector),
            next: Some(next),
            context: EvaluationContext::default(),
            state: State::Initial,
        }
    }
}

fn forward<Req, N>(request: &mut Option<Req>, next: &mut Option<N>) -> N::Future
where
    N: Upstream<Req>,
{
    let request = request.take().expect(POLL_AFTER_READY_ERROR);
    let mut next = next.take().expect(NEXT_TAKEN_ERROR);
    next.call(request)
}

impl<Req, P, S, N> Future for ConditionalFuture<Req, P, S, N>
where
    Req: ConditionalRequest,
    P: Precondition<Req>,
    P::Representation: SelectedRepresentation,
    S: Upstream<Req::Head, Response = Result<P::Representation, Error>>,
    N: Upstream<Req>,
{
    type Output = (Output<Req, P, N>, EvaluationContext);

    fn poll(self: Pin<&mut Self>, cx: &mut task::Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        loop {
            let state = match this.state.as_mut().project() {
                StateProj::Initial => {
                    let request = this.request.as_ref().expect(POLL_AFTER_READY_ERROR);

                    if request.ignores_preconditions() {
                        this.context.bypass(BypassReason::IgnoredMethod);
                        State::PollNext {
                            next: forward(this.request, this.next),
                        }
                    } else if this.preconditions.active(request).is_empty() {
                        this.context.bypass(BypassReason::NoPreconditions);
                        State::PollNext {
                            next: forward(this.request, this.next),
                        }
                    } else {
                        let head = request.without_fields(this.preconditions.fields());
                        let mut selector = this.selector.take().expect(SELECTOR_TAKEN_ERROR);
                        State::SelectRepresentation {
                            selection: selector.call(head),
                        }
                    }
                }
                StateProj::SelectRepresentation { selection } => {
                    match ready!(selection.poll(cx)) {
                        Err(error) => {
                            warn!(%error, "Representation selection failed, forwarding request");
                            this.context.bypass(BypassReason::SelectionFailed);
                            State::PollNext {
                                next: forward(this.request, this.next),
                            }
                        }
                        Ok(representation) if !representation.is_pre_evaluable() => {
                            this.context.bypass(BypassReason::IneligibleStatus);
                            State::PollNext {
                                next: forward(this.request, this.next),
                            }
                        }
                        Ok(representation) => {
                            let request = this.request.as_ref().expect(POLL_AFTER_READY_ERROR);
                            let veto = this
                                .preconditions
                                .active(request)
                                .into_iter()
                                .find_map(|precondition| {
                                    apply(precondition, request, &representation).map(|response| {
                                        (SmolStr::new(precondition.field()), response)
                                    })
                                });

                            match veto {
                                Some((field, response)) => {
                                    debug!(%field, "Precondition responded");
                                    this.context.respond(field);
                                    State::Response {
                                        response: Some(Resolution::Responded(response)),
                                    }
                                }
                                None => {
                                    this.context.outcome = Outcome::Forwarded;
                                    State::PollNext {
                                        next: forward(this.request, this.next),
                                    }
                                }
                            }
                        }
                    }
                }
                StateProj::PollNext { next } => {
                    let response = ready!(next.poll(cx));
                    State::Response {
                        response: Some(Resolution::Forwarded(response)),
                    }
                }
                StateProj::Response { response } => {
                    let response = response.take().expect(POLL_AFTER_READY_ERROR);
                    debug!(
                        outcome = this.context.outcome.as_str(),
                        field = this.context.field.as_deref(),
                        "Conditional request resolved"
                    );
                    crate::metrics::record_context_metrics(this.context);
                    return Poll::Ready((response, this.context.clone()));
                }
            };
            debug!("{:?}", &state);
            this.state.set(state);
        }
    }
}
