//! Metrics declaration and recording.

use crate::context::EvaluationContext;

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
lazy_static! {
    /// Track number of conditional requests by outcome.
    pub static ref CONDITIONAL_REQUESTS_COUNTER: &'static str = {
        metrics::describe_counter!(
            "conditional_requests_total",
            "Total number of requests handled by the conditional middleware."
        );
        "conditional_requests_total"
    };
    /// Track number of responses produced by preconditions, per field.
    pub static ref PRECONDITION_RESPONSES_COUNTER: &'static str = {
        metrics::describe_counter!(
            "conditional_precondition_responses_total",
            "Total number of responses produced by a precondition."
        );
        "conditional_precondition_responses_total"
    };
}

/// Record metrics from an [`EvaluationContext`] once a request is resolved.
///
/// When the `metrics` feature is disabled, this function is a no-op
/// and will be eliminated by the compiler.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_context_metrics(ctx: &EvaluationContext) {
    let reason = match ctx.outcome {
        crate::context::Outcome::Bypassed(reason) => reason.as_str(),
        _ => "",
    };
    metrics::counter!(
        *CONDITIONAL_REQUESTS_COUNTER,
        "outcome" => ctx.outcome.as_str(),
        "reason" => reason
    )
    .increment(1);

    if let Some(field) = &ctx.field {
        metrics::counter!(*PRECONDITION_RESPONSES_COUNTER, "field" => field.to_string())
            .increment(1);
    }
}

/// No-op version when metrics feature is disabled.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_context_metrics(_ctx: &EvaluationContext) {}
