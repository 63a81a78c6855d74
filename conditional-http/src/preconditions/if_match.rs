use bytes::Bytes;
use conditional_core::{Evaluation, Field, Precondition};
use http::header::IF_MATCH;
use http::Response;
use tracing::debug;

use super::{PreconditionError, precondition_failed};
use crate::Representation;
use crate::etag::{EntityTag, FieldTags};
use crate::header::HasHeaders;
use crate::request::ConditionalHttpRequest;

/// `If-Match`: perform the method only if the representation's current entity
/// tag strongly matches one of the listed tags.
///
/// Fails with `412 Precondition Failed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IfMatch;

impl Field for IfMatch {
    fn field(&self) -> &str {
        "if-match"
    }
}

impl<B> Precondition<ConditionalHttpRequest<B>> for IfMatch {
    type Representation = Representation;
    type Response = Response<Bytes>;
    type Error = PreconditionError;

    fn evaluate(
        &self,
        request: &ConditionalHttpRequest<B>,
        representation: &Representation,
    ) -> Result<Evaluation, PreconditionError> {
        let (Some(value), Some(etag)) = (request.field_value(IF_MATCH), representation.etag())
        else {
            return Ok(Evaluation::Inapplicable);
        };

        match (value.parse::<FieldTags>(), etag.parse::<EntityTag>()) {
            (Ok(tags), Ok(etag)) => Ok(tags.matches_strong(&etag).into()),
            (Err(error), _) | (_, Err(error)) => {
                debug!(%error, "Ignoring If-Match");
                Ok(Evaluation::Inapplicable)
            }
        }
    }

    fn respond(
        &self,
        _request: &ConditionalHttpRequest<B>,
        representation: &Representation,
        result: bool,
    ) -> Option<Response<Bytes>> {
        (!result).then(|| precondition_failed(representation))
    }
}
