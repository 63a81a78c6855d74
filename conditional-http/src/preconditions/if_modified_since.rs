use bytes::Bytes;
use conditional_core::{Evaluation, Field, Precondition};
use http::header::{IF_MODIFIED_SINCE, IF_NONE_MATCH};
use http::Response;
use tracing::debug;

use super::{PreconditionError, not_modified};
use crate::Representation;
use crate::date::HttpDate;
use crate::header::HasHeaders;
use crate::request::{ConditionalHttpRequest, is_retrieval};

/// `If-Modified-Since`: for GET and HEAD, transfer the representation only if
/// it was modified after the given date.
///
/// Ignored when `If-None-Match` is present. Fails with `304 Not Modified`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IfModifiedSince;

impl Field for IfModifiedSince {
    fn field(&self) -> &str {
        "if-modified-since"
    }
}

impl<B> Precondition<ConditionalHttpRequest<B>> for IfModifiedSince {
    type Representation = Representation;
    type Response = Response<Bytes>;
    type Error = PreconditionError;

    fn evaluate(
        &self,
        request: &ConditionalHttpRequest<B>,
        representation: &Representation,
    ) -> Result<Evaluation, PreconditionError> {
        if !is_retrieval(request.method()) || request.headers().contains_key(IF_NONE_MATCH) {
            return Ok(Evaluation::Inapplicable);
        }

        let (Some(value), Some(last_modified)) = (
            request.field_value(IF_MODIFIED_SINCE),
            representation.last_modified(),
        ) else {
            return Ok(Evaluation::Inapplicable);
        };

        match (value.parse::<HttpDate>(), last_modified.parse::<HttpDate>()) {
            (Ok(since), Ok(last_modified)) => Ok((last_modified > since).into()),
            (Err(error), _) | (_, Err(error)) => {
                debug!(%error, "Ignoring If-Modified-Since");
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
        (!result).then(|| not_modified(representation))
    }
}
