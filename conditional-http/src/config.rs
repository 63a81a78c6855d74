//! Serde configuration for the precondition set.
//!
//! ```yaml
//! preconditions:
//!   - type: IfMatch
//!   - type: IfNoneMatch
//!   - type: IfRange
//!     units: [bytes]
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use conditional_core::{Field, PreconditionSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::preconditions::{
    HttpPrecondition, IfMatch, IfModifiedSince, IfNoneMatch, IfRange, IfUnmodifiedSince,
};
use crate::range::{BytesRange, SharedRangeSpecifier};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("precondition {0} is configured more than once")]
    Duplicate(String),
    #[error("unsupported range unit: {0}")]
    UnsupportedRangeUnit(String),
    #[error("If-Range requires at least one range unit")]
    NoRangeUnits,
}

/// One configured precondition.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum PreconditionEntry {
    IfMatch,
    IfUnmodifiedSince,
    IfNoneMatch,
    IfModifiedSince,
    IfRange {
        #[serde(default = "default_range_units")]
        units: Vec<String>,
    },
}

fn default_range_units() -> Vec<String> {
    vec!["bytes".to_owned()]
}

fn default_preconditions() -> Vec<PreconditionEntry> {
    vec![
        PreconditionEntry::IfMatch,
        PreconditionEntry::IfUnmodifiedSince,
        PreconditionEntry::IfNoneMatch,
        PreconditionEntry::IfModifiedSince,
        PreconditionEntry::IfRange {
            units: default_range_units(),
        },
    ]
}

/// Which preconditions the middleware evaluates.
///
/// An absent `preconditions` key means all five; an empty list disables
/// conditional evaluation.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PreconditionConfig {
    #[serde(default = "default_preconditions")]
    pub preconditions: Vec<PreconditionEntry>,
}

impl Default for PreconditionConfig {
    fn default() -> Self {
        Self {
            preconditions: default_preconditions(),
        }
    }
}

impl PreconditionEntry {
    fn into_precondition(self) -> Result<HttpPrecondition, ConfigError> {
        Ok(match self {
            PreconditionEntry::IfMatch => IfMatch.into(),
            PreconditionEntry::IfUnmodifiedSince => IfUnmodifiedSince.into(),
            PreconditionEntry::IfNoneMatch => IfNoneMatch.into(),
            PreconditionEntry::IfModifiedSince => IfModifiedSince.into(),
            PreconditionEntry::IfRange { units } => {
                if units.is_empty() {
                    return Err(ConfigError::NoRangeUnits);
                }
                let ranges = units
                    .into_iter()
                    .map(range_specifier)
                    .collect::<Result<Vec<_>, _>>()?;
                IfRange::with_ranges(ranges).into()
            }
        })
    }
}

fn range_specifier(unit: String) -> Result<SharedRangeSpecifier, ConfigError> {
    if unit.eq_ignore_ascii_case("bytes") {
        Ok(Arc::new(BytesRange))
    } else {
        Err(ConfigError::UnsupportedRangeUnit(unit))
    }
}

impl PreconditionConfig {
    /// Validates the configuration and builds the sorted precondition set.
    pub fn into_set(self) -> Result<PreconditionSet<HttpPrecondition>, ConfigError> {
        let mut seen = HashSet::new();
        let preconditions = self
            .preconditions
            .into_iter()
            .map(|entry| {
                let precondition = entry.into_precondition()?;
                if !seen.insert(precondition.field().to_owned()) {
                    return Err(ConfigError::Duplicate(precondition.field().to_owned()));
                }
                Ok(precondition)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PreconditionSet::new(preconditions))
    }
}
