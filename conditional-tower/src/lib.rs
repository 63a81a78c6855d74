//! Tower middleware for HTTP conditional requests.
//!
//! [`Conditional`] is a Tower [`Layer`] that evaluates `If-Match`,
//! `If-None-Match`, `If-Modified-Since`, `If-Unmodified-Since` and `If-Range`
//! before the wrapped service runs. It needs a second service, the
//! *selector*, which returns the current representation of the target
//! resource for a request stripped of its precondition fields.
//!
//! When a precondition vetoes, the middleware answers on its own (304, 412,
//! 206 or 416) and the wrapped service is never called. Otherwise the original
//! request is forwarded untouched.
//!
//! [`Layer`]: tower::Layer
//!
//! # Quick Start
//!
//! ```ignore
//! use conditional_tower::Conditional;
//! use tower::{ServiceBuilder, service_fn};
//!
//! let selector = service_fn(|req: conditional_http::SelectionRequest| async move {
//!     Ok::<_, std::convert::Infallible>(load_representation(req.uri()).await)
//! });
//!
//! let service = ServiceBuilder::new()
//!     .layer(Conditional::new(selector))
//!     .service(service_fn(handler));
//! ```
//!
//! # Configuration
//!
//! By default all five preconditions are active. Use
//! [`Conditional::builder`] to pick a [`PreconditionSet`] or load a
//! [`PreconditionConfig`]:
//!
//! ```ignore
//! let config: PreconditionConfig = serde_saphyr::from_str(yaml)?;
//! let layer = Conditional::builder()
//!     .selector(selector)
//!     .config(config)?
//!     .build();
//! ```
//!
//! # Response Extensions
//!
//! Every response carries the [`EvaluationContext`] in its extensions,
//! describing whether the request was bypassed, forwarded or answered by a
//! precondition.

#![warn(missing_docs)]

/// Future types for the conditional service.
pub mod future;
/// Tower layer and builder.
pub mod layer;
/// The Tower service implementation.
pub mod service;
/// Adapters bridging Tower services to the orchestrator.
pub mod upstream;

pub use conditional::EvaluationContext;
pub use conditional_core::PreconditionSet;
pub use conditional_http::{PreconditionConfig, SelectionRequest, standard_preconditions};
pub use layer::{Conditional, ConditionalBuilder, NotSet};
pub use service::ConditionalService;
pub use upstream::{TowerSelector, TowerUpstream};
