//! Ordered, immutable collection of preconditions.

use std::fmt;
use std::sync::Arc;

use crate::{ConditionalRequest, Field, compare_fields};

/// Preconditions sorted by protocol precedence.
///
/// Built once per middleware instance and shared read-only across requests.
/// Cloning is cheap: the sorted list lives behind an [`Arc`].
pub struct PreconditionSet<P> {
    preconditions: Arc<[P]>,
}

impl<P> PreconditionSet<P>
where
    P: Field,
{
    /// Creates a set sorted in ascending precedence.
    ///
    /// The sort is stable, so preconditions with fields outside the standard
    /// table keep the order they were supplied in.
    pub fn new<I>(preconditions: I) -> Self
    where
        I: IntoIterator<Item = P>,
    {
        let mut preconditions: Vec<P> = preconditions.into_iter().collect();
        preconditions.sort_by(|left, right| compare_fields(left.field(), right.field()));
        Self {
            preconditions: preconditions.into(),
        }
    }

    /// Iterates preconditions in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.preconditions.iter()
    }

    /// Iterates the fields of every precondition in the set.
    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.preconditions.iter().map(|p| p.field())
    }

    /// Preconditions whose field is present on `request`, in evaluation order.
    pub fn active<'a, Req>(&'a self, request: &Req) -> Vec<&'a P>
    where
        Req: ConditionalRequest,
    {
        self.preconditions
            .iter()
            .filter(|p| request.has_field(p.field()))
            .collect()
    }

    /// Number of preconditions in the set.
    pub fn len(&self) -> usize {
        self.preconditions.len()
    }

    /// Returns `true` if the set holds no preconditions.
    pub fn is_empty(&self) -> bool {
        self.preconditions.is_empty()
    }
}

impl<P> Clone for PreconditionSet<P> {
    fn clone(&self) -> Self {
        Self {
            preconditions: Arc::clone(&self.preconditions),
        }
    }
}

impl<P> fmt::Debug for PreconditionSet<P>
where
    P: Field,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.fields()).finish()
    }
}

impl<'a, P> IntoIterator for &'a PreconditionSet<P>
where
    P: Field,
{
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P> FromIterator<P> for PreconditionSet<P>
where
    P: Field,
{
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    struct Headers(Vec<&'static str>);

    impl ConditionalRequest for Headers {
        type Head = ();

        fn ignores_preconditions(&self) -> bool {
            false
        }

        fn has_field(&self, field: &str) -> bool {
            self.0.iter().any(|f| f.eq_ignore_ascii_case(field))
        }

        fn without_fields<'a, I>(&self, _: I) -> Self::Head
        where
            I: IntoIterator<Item = &'a str>,
        {
        }
    }

    impl Field for Named {
        fn field(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_set_is_sorted_by_precedence() {
        let set = PreconditionSet::new([
            Named("If-Range"),
            Named("x-custom"),
            Named("if-modified-since"),
            Named("if-none-match"),
            Named("if-unmodified-since"),
            Named("if-match"),
        ]);

        let fields: Vec<&str> = set.fields().collect();
        assert_eq!(
            fields,
            vec![
                "if-match",
                "if-unmodified-since",
                "if-none-match",
                "if-modified-since",
                "If-Range",
                "x-custom",
            ]
        );
    }

    #[test]
    fn test_active_filters_by_present_field() {
        let set: PreconditionSet<Named> =
            [Named("if-none-match"), Named("if-match"), Named("if-range")]
                .into_iter()
                .collect();
        let request = Headers(vec!["If-None-Match", "range", "if-range"]);

        let active_set = set.active(&request);
        let active: Vec<&str> = active_set.iter().map(|p| p.field()).collect();
        assert_eq!(active, vec!["if-none-match", "if-range"]);
    }

    #[test]
    fn test_empty_set() {
        let set = PreconditionSet::<Named>::new([]);
        assert!(set.is_empty());
        assert!(set.active(&Headers(vec!["if-match"])).is_empty());
    }
}
