use bytes::Bytes;
use conditional_core::{Evaluation, Field, Precondition};
use http::header::IF_NONE_MATCH;
use http::Response;
use tracing::debug;

use super::{PreconditionError, not_modified, precondition_failed};
use crate::Representation;
use crate::etag::{EntityTag, FieldTags};
use crate::header::HasHeaders;
use crate::request::{ConditionalHttpRequest, is_retrieval};

/// `If-None-Match`: perform the method only if no listed tag weakly matches
/// the representation's current entity tag.
///
/// Fails with `304 Not Modified` for GET and HEAD, `412 Precondition Failed`
/// otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct IfNoneMatch;

impl Field for IfNoneMatch {
    fn field(&self) -> &str {
        "if-none-match"
    }
}

impl<B> Precondition<ConditionalHttpRequest<B>> for IfNoneMatch {
    type Representation = Representation;
    type Response = Response<Bytes>;
    type Error = PreconditionError;

    fn evaluate(
        &self,
        request: &ConditionalHttpRequest<B>,
        representation: &Representation,
    ) -> Result<Evaluation, PreconditionError> {
        let (Some(value), Some(etag)) = (request.field_value(IF_NONE_MATCH), representation.etag())
        else {
            return Ok(Evaluation::Inapplicable);
        };

        match (value.parse::<FieldTags>(), etag.parse::<EntityTag>()) {
            (Ok(tags), Ok(etag)) => Ok((!tags.matches_weak(&etag)).into()),
            (Err(error), _) | (_, Err(error)) => {
                debug!(%error, "Ignoring If-None-Match");
                Ok(Evaluation::Inapplicable)
            }
        }
    }

    fn respond(
        &self,
        request: &ConditionalHttpRequest<B>,
        representation: &Representation,
        result: bool,
    ) -> Option<Response<Bytes>> {
        if result {
            return None;
        }

        if is_retrieval(request.method()) {
            Some(not_modified(representation))
        } else {
            Some(precondition_failed(representation))
        }
    }
}
