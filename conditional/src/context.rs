//! Evaluation outcome types.

use smol_str::SmolStr;

/// Why a request was forwarded without evaluating its preconditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BypassReason {
    /// CONNECT, OPTIONS or TRACE.
    IgnoredMethod,
    /// No configured precondition field was present.
    NoPreconditions,
    /// The selected representation's status was neither 2xx nor 412.
    IneligibleStatus,
    /// Representation selection failed.
    SelectionFailed,
}

impl BypassReason {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            BypassReason::IgnoredMethod => "ignored_method",
            BypassReason::NoPreconditions => "no_preconditions",
            BypassReason::IneligibleStatus => "ineligible_status",
            BypassReason::SelectionFailed => "selection_failed",
        }
    }
}

/// How a conditional request was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Forwarded to the next handler without applying any precondition.
    Bypassed(BypassReason),
    /// Preconditions were applied and none vetoed; forwarded to the next handler.
    Forwarded,
    /// A precondition produced the response.
    Responded,
}

impl Outcome {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Bypassed(_) => "bypassed",
            Outcome::Forwarded => "forwarded",
            Outcome::Responded => "responded",
        }
    }
}

/// Per-request record of what the orchestrator decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationContext {
    /// The decision.
    pub outcome: Outcome,
    /// Field of the precondition that responded, if any.
    pub field: Option<SmolStr>,
}

impl EvaluationContext {
    pub(crate) fn bypass(&mut self, reason: BypassReason) {
        self.outcome = Outcome::Bypassed(reason);
    }

    pub(crate) fn respond(&mut self, field: SmolStr) {
        self.outcome = Outcome::Responded;
        self.field = Some(field);
    }

    /// Returns `true` if the request reached the next handler.
    pub fn is_forwarded(&self) -> bool {
        !matches!(self.outcome, Outcome::Responded)
    }
}

impl Default for EvaluationContext {
    fn default() -> Self {
        Self {
            outcome: Outcome::Forwarded,
            field: None,
        }
    }
}

/// The output of a conditional request: either a precondition's response or
/// the next handler's.
#[derive(Debug)]
pub enum Resolution<R, N> {
    /// A precondition vetoed normal processing and produced this response.
    Responded(R),
    /// The next handler's response.
    Forwarded(N),
}

impl<R, N> Resolution<R, N> {
    /// Returns `true` for [`Resolution::Responded`].
    pub fn is_responded(&self) -> bool {
        matches!(self, Resolution::Responded(_))
    }

    /// The precondition response, if any.
    pub fn responded(self) -> Option<R> {
        match self {
            Resolution::Responded(response) => Some(response),
            Resolution::Forwarded(_) => None,
        }
    }

    /// The next handler's response, if the request was forwarded.
    pub fn forwarded(self) -> Option<N> {
        match self {
            Resolution::Responded(_) => None,
            Resolution::Forwarded(response) => Some(response),
        }
    }
}
