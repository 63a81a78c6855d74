//! The standard HTTP preconditions.
//!
//! Each precondition is bound to one request field and evaluated against a
//! [`Representation`]. [`HttpPrecondition`] is the closed set used by the
//! middleware; the individual types can also be composed into a custom
//! [`PreconditionSet`].

mod if_match;
mod if_modified_since;
mod if_none_match;
mod if_range;
mod if_unmodified_since;

use bytes::Bytes;
use conditional_core::{Evaluation, Field, Precondition, PreconditionSet};
use http::header::HeaderName;
use http::{Response, StatusCode};
use thiserror::Error;

use crate::Representation;
use crate::date::InvalidHttpDate;
use crate::etag::InvalidEntityTag;
use crate::header::{CONTENT_HEADERS, REPRESENTATION_HEADERS};
use crate::request::ConditionalHttpRequest;

pub use if_match::IfMatch;
pub use if_modified_since::IfModifiedSince;
pub use if_none_match::IfNoneMatch;
pub use if_range::IfRange;
pub use if_unmodified_since::IfUnmodifiedSince;

/// A precondition that was applicable but could not be compared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// The representation lacks the validator the field must be compared with.
    #[error("representation has no {0} validator")]
    MissingValidator(HeaderName),
    #[error(transparent)]
    EntityTag(#[from] InvalidEntityTag),
    #[error(transparent)]
    Date(#[from] InvalidHttpDate),
}

/// One of the five standard preconditions.
#[derive(Debug, Clone)]
pub enum HttpPrecondition {
    IfMatch(IfMatch),
    IfUnmodifiedSince(IfUnmodifiedSince),
    IfNoneMatch(IfNoneMatch),
    IfModifiedSince(IfModifiedSince),
    IfRange(IfRange),
}

impl Field for HttpPrecondition {
    fn field(&self) -> &str {
        match self {
            HttpPrecondition::IfMatch(p) => p.field(),
            HttpPrecondition::IfUnmodifiedSince(p) => p.field(),
            HttpPrecondition::IfNoneMatch(p) => p.field(),
            HttpPrecondition::IfModifiedSince(p) => p.field(),
            HttpPrecondition::IfRange(p) => p.field(),
        }
    }
}

impl<B> Precondition<ConditionalHttpRequest<B>> for HttpPrecondition {
    type Representation = Representation;
    type Response = Response<Bytes>;
    type Error = PreconditionError;

    fn evaluate(
        &self,
        request: &ConditionalHttpRequest<B>,
        representation: &Representation,
    ) -> Result<Evaluation, PreconditionError> {
        match self {
            HttpPrecondition::IfMatch(p) => p.evaluate(request, representation),
            HttpPrecondition::IfUnmodifiedSince(p) => p.evaluate(request, representation),
            HttpPrecondition::IfNoneMatch(p) => p.evaluate(request, representation),
            HttpPrecondition::IfModifiedSince(p) => p.evaluate(request, representation),
            HttpPrecondition::IfRange(p) => p.evaluate(request, representation),
        }
    }

    fn respond(
        &self,
        request: &ConditionalHttpRequest<B>,
        representation: &Representation,
        result: bool,
    ) -> Option<Response<Bytes>> {
        match self {
            HttpPrecondition::IfMatch(p) => p.respond(request, representation, result),
            HttpPrecondition::IfUnmodifiedSince(p) => p.respond(request, representation, result),
            HttpPrecondition::IfNoneMatch(p) => p.respond(request, representation, result),
            HttpPrecondition::IfModifiedSince(p) => p.respond(request, representation, result),
            HttpPrecondition::IfRange(p) => p.respond(request, representation, result),
        }
    }
}

impl From<IfMatch> for HttpPrecondition {
    fn from(value: IfMatch) -> Self {
        HttpPrecondition::IfMatch(value)
    }
}

impl From<IfUnmodifiedSince> for HttpPrecondition {
    fn from(value: IfUnmodifiedSince) -> Self {
        HttpPrecondition::IfUnmodifiedSince(value)
    }
}

impl From<IfNoneMatch> for HttpPrecondition {
    fn from(value: IfNoneMatch) -> Self {
        HttpPrecondition::IfNoneMatch(value)
    }
}

impl From<IfModifiedSince> for HttpPrecondition {
    fn from(value: IfModifiedSince) -> Self {
        HttpPrecondition::IfModifiedSince(value)
    }
}

impl From<IfRange> for HttpPrecondition {
    fn from(value: IfRange) -> Self {
        HttpPrecondition::IfRange(value)
    }
}

/// The five standard preconditions, `If-Range` supporting the `bytes` unit.
pub fn standard_preconditions() -> PreconditionSet<HttpPrecondition> {
    PreconditionSet::new([
        HttpPrecondition::from(IfMatch),
        HttpPrecondition::from(IfNoneMatch),
        HttpPrecondition::from(IfModifiedSince),
        HttpPrecondition::from(IfUnmodifiedSince),
        HttpPrecondition::from(IfRange::default()),
    ])
}

fn precondition_failed(representation: &Representation) -> Response<Bytes> {
    representation.to_empty_response(StatusCode::PRECONDITION_FAILED, &REPRESENTATION_HEADERS)
}

fn not_modified(representation: &Representation) -> Response<Bytes> {
    representation.to_empty_response(StatusCode::NOT_MODIFIED, &CONTENT_HEADERS)
}
