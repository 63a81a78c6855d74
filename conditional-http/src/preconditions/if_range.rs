use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use conditional_core::{Evaluation, Field, Precondition};
use http::header::{ETAG, IF_RANGE, LAST_MODIFIED, RANGE};
use http::{Method, Response};

use super::PreconditionError;
use crate::Representation;
use crate::date::HttpDate;
use crate::etag::{EntityTag, is_entity_tag_like};
use crate::header::HasHeaders;
use crate::range::{BytesRange, SharedRangeSpecifier, with_content_range};
use crate::request::ConditionalHttpRequest;

/// `If-Range`: serve the requested ranges only if the representation is
/// unchanged, otherwise respond with the full representation.
///
/// The field holds either an entity tag, compared strongly, or an HTTP-date,
/// compared for exact equality with `Last-Modified`. A true evaluation hands
/// the `Range` field to the configured range units.
#[derive(Clone)]
pub struct IfRange {
    ranges: Arc<[SharedRangeSpecifier]>,
}

impl IfRange {
    /// `If-Range` supporting the `bytes` unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// `If-Range` supporting exactly the given range units.
    pub fn with_ranges<I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = SharedRangeSpecifier>,
    {
        Self {
            ranges: ranges.into_iter().collect(),
        }
    }

    pub fn ranges(&self) -> &[SharedRangeSpecifier] {
        &self.ranges
    }
}

impl Default for IfRange {
    fn default() -> Self {
        Self::with_ranges([Arc::new(BytesRange) as SharedRangeSpecifier])
    }
}

impl fmt::Debug for IfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IfRange")
            .field(
                "units",
                &self.ranges.iter().map(|r| r.unit()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Field for IfRange {
    fn field(&self) -> &str {
        "if-range"
    }
}

impl<B> Precondition<ConditionalHttpRequest<B>> for IfRange {
    type Representation = Representation;
    type Response = Response<Bytes>;
    type Error = PreconditionError;

    fn evaluate(
        &self,
        request: &ConditionalHttpRequest<B>,
        representation: &Representation,
    ) -> Result<Evaluation, PreconditionError> {
        if *request.method() != Method::GET || !request.headers().contains_key(RANGE) {
            return Ok(Evaluation::Inapplicable);
        }
        let Some(value) = request.field_value(IF_RANGE) else {
            return Ok(Evaluation::Inapplicable);
        };
        if representation.accepts_no_ranges() {
            return Ok(Evaluation::Inapplicable);
        }

        if is_entity_tag_like(&value) {
            let etag = representation
                .etag()
                .ok_or(PreconditionError::MissingValidator(ETAG))?;
            let requested: EntityTag = value.parse()?;
            let current: EntityTag = etag.parse()?;
            Ok(requested.strong_eq(&current).into())
        } else {
            let last_modified = representation
                .last_modified()
                .ok_or(PreconditionError::MissingValidator(LAST_MODIFIED))?;
            let requested: HttpDate = value.parse()?;
            let current: HttpDate = last_modified.parse()?;
            Ok((requested == current).into())
        }
    }

    fn respond(
        &self,
        request: &ConditionalHttpRequest<B>,
        representation: &Representation,
        result: bool,
    ) -> Option<Response<Bytes>> {
        let range = match request.field_value(RANGE) {
            Some(range) if result => range,
            _ => return Some(representation.to_response()),
        };

        Some(with_content_range(representation, &range, self.ranges()))
    }
}
