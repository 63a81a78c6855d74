//! Tri-state result of evaluating a precondition.

/// Outcome of [`Precondition::evaluate`](crate::Precondition::evaluate).
///
/// A precondition either holds, fails, or does not apply to the current
/// request at all. The third state is kept explicit so that "does not apply"
/// can never be mistaken for a failed condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Evaluation {
    /// The condition holds for the selected representation.
    Matched,
    /// The condition does not hold for the selected representation.
    NotMatched,
    /// The precondition must be ignored and must not influence the decision.
    ///
    /// Returned when the field is absent or malformed, the method is not
    /// eligible, a competing field takes priority, or the representation lacks
    /// the metadata needed for comparison.
    Inapplicable,
}

impl Evaluation {
    /// Returns the boolean result, or `None` for [`Evaluation::Inapplicable`].
    #[inline]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Evaluation::Matched => Some(true),
            Evaluation::NotMatched => Some(false),
            Evaluation::Inapplicable => None,
        }
    }

    /// Returns `true` unless the evaluation is [`Evaluation::Inapplicable`].
    #[inline]
    pub const fn is_applicable(self) -> bool {
        !matches!(self, Evaluation::Inapplicable)
    }

    /// Returns the evaluation as a string slice.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Evaluation::Matched => "matched",
            Evaluation::NotMatched => "not_matched",
            Evaluation::Inapplicable => "inapplicable",
        }
    }
}

impl From<bool> for Evaluation {
    fn from(value: bool) -> Self {
        if value {
            Evaluation::Matched
        } else {
            Evaluation::NotMatched
        }
    }
}

impl From<Option<bool>> for Evaluation {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Evaluation::Inapplicable, Evaluation::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_conversion() {
        assert_eq!(Evaluation::from(true), Evaluation::Matched);
        assert_eq!(Evaluation::from(false), Evaluation::NotMatched);
        assert_eq!(Evaluation::from(None), Evaluation::Inapplicable);
        assert_eq!(Evaluation::from(Some(false)), Evaluation::NotMatched);
    }

    #[test]
    fn test_inapplicable_has_no_bool() {
        assert_eq!(Evaluation::Matched.as_bool(), Some(true));
        assert_eq!(Evaluation::NotMatched.as_bool(), Some(false));
        assert_eq!(Evaluation::Inapplicable.as_bool(), None);
        assert!(!Evaluation::Inapplicable.is_applicable());
    }
}
