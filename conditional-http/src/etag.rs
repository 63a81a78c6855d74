//! Entity tags and their comparison functions.
//!
//! ```text
//! entity-tag = [ weak ] opaque-tag
//! weak       = %s"W/"
//! opaque-tag = DQUOTE *etagc DQUOTE
//! etagc      = %x21 / %x23-7E / obs-text
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::header::split_list;

/// Error returned when a value does not follow the entity-tag grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid entity tag: {0:?}")]
pub struct InvalidEntityTag(String);

/// A parsed entity tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityTag {
    tag: String,
    weak: bool,
}

impl EntityTag {
    /// Creates a strong entity tag from its opaque value (without quotes).
    pub fn strong(tag: impl Into<String>) -> Result<Self, InvalidEntityTag> {
        Self::new(tag.into(), false)
    }

    /// Creates a weak entity tag from its opaque value (without quotes).
    pub fn weak(tag: impl Into<String>) -> Result<Self, InvalidEntityTag> {
        Self::new(tag.into(), true)
    }

    fn new(tag: String, weak: bool) -> Result<Self, InvalidEntityTag> {
        if tag.chars().all(is_etagc) {
            Ok(Self { tag, weak })
        } else {
            Err(InvalidEntityTag(tag))
        }
    }

    /// The opaque tag, without quotes or weakness prefix.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Whether the tag carries the `W/` weakness indicator.
    pub fn is_weak(&self) -> bool {
        self.weak
    }

    /// Strong comparison: both tags are strong and their opaque tags are equal.
    pub fn strong_eq(&self, other: &EntityTag) -> bool {
        !self.weak && !other.weak && self.tag == other.tag
    }

    /// Weak comparison: opaque tags are equal, weakness is ignored.
    pub fn weak_eq(&self, other: &EntityTag) -> bool {
        self.tag == other.tag
    }
}

impl FromStr for EntityTag {
    type Err = InvalidEntityTag;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let (weak, opaque) = match trimmed.strip_prefix("W/") {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        opaque
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .filter(|tag| tag.chars().all(is_etagc))
            .map(|tag| Self {
                tag: tag.to_owned(),
                weak,
            })
            .ok_or_else(|| InvalidEntityTag(value.to_owned()))
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weak {
            f.write_str("W/")?;
        }
        write!(f, "\"{}\"", self.tag)
    }
}

fn is_etagc(c: char) -> bool {
    c == '!' || ('#'..='~').contains(&c) || !c.is_ascii()
}

/// Returns `true` if `value` looks like an entity tag rather than an HTTP-date.
///
/// Used by `If-Range`, whose field holds either form.
pub fn is_entity_tag_like(value: &str) -> bool {
    let value = value.trim_start();
    value.starts_with('"') || value.starts_with("W/\"")
}

/// The value of an `If-Match` or `If-None-Match` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldTags {
    /// The `*` wildcard.
    Any,
    /// A list of entity tags.
    Tags(Vec<EntityTag>),
}

impl FieldTags {
    /// Whether any listed tag strong-matches `etag`. The wildcard matches anything.
    pub fn matches_strong(&self, etag: &EntityTag) -> bool {
        match self {
            FieldTags::Any => true,
            FieldTags::Tags(tags) => tags.iter().any(|tag| tag.strong_eq(etag)),
        }
    }

    /// Whether any listed tag weak-matches `etag`. The wildcard matches anything.
    pub fn matches_weak(&self, etag: &EntityTag) -> bool {
        match self {
            FieldTags::Any => true,
            FieldTags::Tags(tags) => tags.iter().any(|tag| tag.weak_eq(etag)),
        }
    }
}

impl FromStr for FieldTags {
    type Err = InvalidEntityTag;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim() == "*" {
            return Ok(FieldTags::Any);
        }

        split_list(value)
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(FieldTags::Tags)
    }
}
