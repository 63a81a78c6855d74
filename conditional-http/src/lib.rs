//! HTTP bindings for conditional request evaluation.
//!
//! Implements the `conditional-core` capabilities for [`ConditionalHttpRequest`] and
//! provides the five standard preconditions of RFC 9110 section 13.1, together
//! with the range computation `If-Range` hands off to.
//!
//! ```rust,ignore
//! use conditional_http::{Representation, standard_preconditions};
//!
//! let preconditions = standard_preconditions();
//! let active = preconditions.active(&request);
//! ```

pub mod body;
pub mod config;
pub mod date;
pub mod etag;
pub mod header;
pub mod preconditions;
pub mod range;
mod representation;
mod request;

pub use body::ConditionalBody;
pub use config::{ConfigError, PreconditionConfig, PreconditionEntry};
pub use date::{HttpDate, InvalidHttpDate};
pub use etag::{EntityTag, FieldTags, InvalidEntityTag};
pub use header::HasHeaders;
pub use preconditions::{
    HttpPrecondition, IfMatch, IfModifiedSince, IfNoneMatch, IfRange, IfUnmodifiedSince,
    PreconditionError, standard_preconditions,
};
pub use range::{BytesRange, RangeError, RangeSpecifier, SatisfiedRange, with_content_range};
pub use representation::Representation;
pub use request::{ConditionalHttpRequest, SelectionRequest, is_retrieval};
