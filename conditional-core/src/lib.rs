#![warn(missing_docs)]
//! # conditional-core
//!
//! Core traits and types for conditional request evaluation.
//!
//! This crate holds the **protocol-agnostic** part of the engine. Protocol
//! bindings (like `conditional-http`) implement the traits defined here, and
//! the orchestrator in `conditional` drives them.
//!
//! ## Architecture
//!
//! A request carrying precondition fields is evaluated against the currently
//! selected representation of its target resource. This crate provides the
//! traits the orchestrator uses to:
//!
//! - **Evaluate** a single precondition ([`Precondition`], [`Evaluation`])
//! - **Order** preconditions by protocol precedence ([`precedence`], [`PreconditionSet`])
//! - **Inspect** requests and representations ([`ConditionalRequest`], [`SelectedRepresentation`])
//! - **Call** representation selection and the next handler ([`Upstream`])
//!

pub mod evaluation;
pub mod precedence;
pub mod precondition;
pub mod request;
pub mod set;
pub mod upstream;

pub use evaluation::Evaluation;
pub use precedence::{compare_fields, priority};
pub use precondition::{Field, Precondition, apply};
pub use request::{ConditionalRequest, SelectedRepresentation};
pub use set::PreconditionSet;
pub use upstream::Upstream;
