use bytes::Bytes;
use conditional_core::{Evaluation, Field, Precondition};
use http::header::{IF_MATCH, IF_UNMODIFIED_SINCE};
use http::Response;
use tracing::debug;

use super::{PreconditionError, precondition_failed};
use crate::Representation;
use crate::date::HttpDate;
use crate::header::HasHeaders;
use crate::request::ConditionalHttpRequest;

/// `If-Unmodified-Since`: perform the method only if the representation was
/// not modified after the given date.
///
/// Ignored when `If-Match` is present. Fails with `412 Precondition Failed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IfUnmodifiedSince;

impl Field for IfUnmodifiedSince {
    fn field(&self) -> &str {
        "if-unmodified-since"
    }
}

impl<B> Precondition<ConditionalHttpRequest<B>> for IfUnmodifiedSince {
    type Representation = Representation;
    type Response = Response<Bytes>;
    type Error = PreconditionError;

    fn evaluate(
        &self,
        request: &ConditionalHttpRequest<B>,
        representation: &Representation,
    ) -> Result<Evaluation, PreconditionError> {
        if request.headers().contains_key(IF_MATCH) {
            return Ok(Evaluation::Inapplicable);
        }

        let (Some(value), Some(last_modified)) = (
            request.field_value(IF_UNMODIFIED_SINCE),
            representation.last_modified(),
        ) else {
            return Ok(Evaluation::Inapplicable);
        };

        match (value.parse::<HttpDate>(), last_modified.parse::<HttpDate>()) {
            (Ok(since), Ok(last_modified)) => Ok((last_modified <= since).into()),
            (Err(error), _) | (_, Err(error)) => {
                debug!(%error, "Ignoring If-Unmodified-Since");
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
