#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! # conditional
//!
//! Orchestration of HTTP conditional requests (RFC 9110 section 13).
//!
//! The [`ConditionalFuture`] takes a request, the configured
//! [`PreconditionSet`], a representation selector and the next handler. It
//! decides whether any precondition applies, selects the representation at
//! most once, applies the preconditions in precedence order and either
//! returns the first terminal response or forwards the original request.
//!
//! Protocol details live behind the traits of `conditional-core`; see
//! `conditional-http` for the HTTP bindings and `conditional-tower` for the
//! Tower middleware.

/// Evaluation outcome types.
///
/// - [`EvaluationContext`](context::EvaluationContext) records what the orchestrator decided
/// - [`Resolution`](context::Resolution) carries either a precondition response or the next handler's
pub mod context;

/// Errors raised by the collaborators of the orchestrator.
pub mod error;

/// Finite State Machine driving a single conditional request.
pub mod fsm;

/// Metrics collection.
///
/// When the `metrics` feature is enabled, counts resolved requests by outcome
/// and precondition responses by field.
pub mod metrics;

pub use context::{BypassReason, EvaluationContext, Outcome, Resolution};
pub use error::{BoxError, Error};
pub use fsm::ConditionalFuture;

pub use conditional_core::{
    ConditionalRequest, Evaluation, Field, Precondition, PreconditionSet, SelectedRepresentation,
    Upstream, apply, compare_fields, priority,
};
