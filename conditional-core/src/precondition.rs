//! The precondition capability and the single-step application rule.
//!
//! A [`Precondition`] is a stateless policy object bound to one request
//! field. The orchestrator asks it to [`evaluate`](Precondition::evaluate) the
//! request against the selected representation and, when the evaluation is
//! applicable, to [`respond`](Precondition::respond) with either a terminal
//! response (veto) or `None` (continue).

use std::sync::Arc;

use tracing::debug;

use crate::{ConditionalRequest, Evaluation};

/// Identity of a precondition: the request field it is bound to.
///
/// Split from [`Precondition`] so that ordering and header stripping do not
/// depend on the request type.
pub trait Field {
    /// The request field name, in lowercase.
    fn field(&self) -> &str;
}

/// A header-driven rule that may veto normal request processing.
///
/// Implementations must be immutable after construction: one instance is
/// shared by every request handled by a middleware instance.
///
/// # Errors
///
/// [`evaluate`](Precondition::evaluate) returns `Err` when the precondition
/// is structurally applicable but cannot be compared (for example `If-Range`
/// against a representation without the counterpart validator). Callers treat
/// an error exactly like [`Evaluation::Inapplicable`]; it never aborts the
/// request.
pub trait Precondition<Req>: Field {
    /// Selected representation type compared against.
    type Representation;
    /// Terminal response produced on veto.
    type Response;
    /// Error raised by [`evaluate`](Precondition::evaluate).
    type Error: std::error::Error;

    /// Evaluates the request condition against the representation.
    fn evaluate(
        &self,
        request: &Req,
        representation: &Self::Representation,
    ) -> Result<Evaluation, Self::Error>;

    /// Produces the terminal response for an applicable evaluation result.
    ///
    /// `None` lets processing continue with the next precondition or the
    /// next handler.
    fn respond(
        &self,
        request: &Req,
        representation: &Self::Representation,
        result: bool,
    ) -> Option<Self::Response>;
}

impl<T> Field for &T
where
    T: Field + ?Sized,
{
    fn field(&self) -> &str {
        (**self).field()
    }
}

impl<Req, T> Precondition<Req> for &T
where
    T: Precondition<Req> + ?Sized,
{
    type Representation = T::Representation;
    type Response = T::Response;
    type Error = T::Error;

    fn evaluate(
        &self,
        request: &Req,
        representation: &T::Representation,
    ) -> Result<Evaluation, T::Error> {
        (**self).evaluate(request, representation)
    }

    fn respond(
        &self,
        request: &Req,
        representation: &T::Representation,
        result: bool,
    ) -> Option<T::Response> {
        (**self).respond(request, representation, result)
    }
}

impl<T> Field for Box<T>
where
    T: Field + ?Sized,
{
    fn field(&self) -> &str {
        self.as_ref().field()
    }
}

impl<Req, T> Precondition<Req> for Box<T>
where
    T: Precondition<Req> + ?Sized,
{
    type Representation = T::Representation;
    type Response = T::Response;
    type Error = T::Error;

    fn evaluate(
        &self,
        request: &Req,
        representation: &T::Representation,
    ) -> Result<Evaluation, T::Error> {
        self.as_ref().evaluate(request, representation)
    }

    fn respond(
        &self,
        request: &Req,
        representation: &T::Representation,
        result: bool,
    ) -> Option<T::Response> {
        self.as_ref().respond(request, representation, result)
    }
}

impl<T> Field for Arc<T>
where
    T: Field + ?Sized,
{
    fn field(&self) -> &str {
        self.as_ref().field()
    }
}

impl<Req, T> Precondition<Req> for Arc<T>
where
    T: Precondition<Req> + ?Sized,
{
    type Representation = T::Representation;
    type Response = T::Response;
    type Error = T::Error;

    fn evaluate(
        &self,
        request: &Req,
        representation: &T::Representation,
    ) -> Result<Evaluation, T::Error> {
        self.as_ref().evaluate(request, representation)
    }

    fn respond(
        &self,
        request: &Req,
        representation: &T::Representation,
        result: bool,
    ) -> Option<T::Response> {
        self.as_ref().respond(request, representation, result)
    }
}

/// Applies one precondition to a request/representation pair.
///
/// Returns the terminal response if the precondition vetoes, `None` if it
/// must be ignored or lets processing continue. `respond` is only called
/// for applicable evaluations.
pub fn apply<Req, P>(
    precondition: &P,
    request: &Req,
    representation: &P::Representation,
) -> Option<P::Response>
where
    Req: ConditionalRequest,
    P: Precondition<Req> + ?Sized,
{
    let field = precondition.field();

    if !request.has_field(field) {
        return None;
    }

    let evaluation = match precondition.evaluate(request, representation) {
        Ok(evaluation) => evaluation,
        Err(error) => {
            debug!(field, %error, "Precondition could not be evaluated, ignoring");
            return None;
        }
    };
    debug!(field, evaluation = evaluation.as_str(), "Precondition evaluated");

    let result = evaluation.as_bool()?;
    precondition.respond(request, representation, result)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::fmt;

    use super::*;

    #[derive(Debug)]
    struct Unreadable;

    impl fmt::Display for Unreadable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("unreadable")
        }
    }

    impl std::error::Error for Unreadable {}

    struct Fields(Vec<&'static str>);

    impl ConditionalRequest for Fields {
        type Head = Vec<&'static str>;

        fn ignores_preconditions(&self) -> bool {
            false
        }

        fn has_field(&self, field: &str) -> bool {
            self.0.iter().any(|f| f.eq_ignore_ascii_case(field))
        }

        fn without_fields<'a, I>(&self, fields: I) -> Self::Head
        where
            I: IntoIterator<Item = &'a str>,
        {
            let fields: Vec<&str> = fields.into_iter().collect();
            self.0
                .iter()
                .copied()
                .filter(|f| !fields.contains(f))
                .collect()
        }
    }

    struct Scripted {
        evaluation: Result<Evaluation, ()>,
        evaluated: Cell<usize>,
        responded: Cell<usize>,
    }

    impl Scripted {
        fn new(evaluation: Result<Evaluation, ()>) -> Self {
            Self {
                evaluation,
                evaluated: Cell::new(0),
                responded: Cell::new(0),
            }
        }
    }

    impl Field for Scripted {
        fn field(&self) -> &str {
            "x-test"
        }
    }

    impl Precondition<Fields> for Scripted {
        type Representation = ();
        type Response = &'static str;
        type Error = Unreadable;

        fn evaluate(&self, _: &Fields, _: &()) -> Result<Evaluation, Unreadable> {
            self.evaluated.set(self.evaluated.get() + 1);
            self.evaluation.map_err(|_| Unreadable)
        }

        fn respond(&self, _: &Fields, _: &(), result: bool) -> Option<&'static str> {
            self.responded.set(self.responded.get() + 1);
            (!result).then_some("vetoed")
        }
    }

    #[test]
    fn test_absent_field_is_not_evaluated() {
        let precondition = Scripted::new(Ok(Evaluation::NotMatched));
        let result = apply(&precondition, &Fields(vec!["x-other"]), &());

        assert_eq!(result, None);
        assert_eq!(precondition.evaluated.get(), 0);
        assert_eq!(precondition.responded.get(), 0);
    }

    #[test]
    fn test_inapplicable_is_not_responded() {
        let precondition = Scripted::new(Ok(Evaluation::Inapplicable));
        let result = apply(&precondition, &Fields(vec!["X-Test"]), &());

        assert_eq!(result, None);
        assert_eq!(precondition.evaluated.get(), 1);
        assert_eq!(precondition.responded.get(), 0);
    }

    #[test]
    fn test_error_degrades_to_ignore() {
        let precondition = Scripted::new(Err(()));
        let result = apply(&precondition, &Fields(vec!["x-test"]), &());

        assert_eq!(result, None);
        assert_eq!(precondition.responded.get(), 0);
    }

    #[test]
    fn test_applicable_result_is_responded() {
        let failing = Scripted::new(Ok(Evaluation::NotMatched));
        assert_eq!(
            apply(&failing, &Fields(vec!["x-test"]), &()),
            Some("vetoed")
        );

        let passing = Scripted::new(Ok(Evaluation::Matched));
        assert_eq!(apply(&passing, &Fields(vec!["x-test"]), &()), None);
        assert_eq!(passing.responded.get(), 1);
    }

    #[test]
    fn test_apply_through_box_and_arc() {
        let boxed: Box<Scripted> = Box::new(Scripted::new(Ok(Evaluation::NotMatched)));
        assert_eq!(apply(&boxed, &Fields(vec!["x-test"]), &()), Some("vetoed"));

        let shared = Arc::new(Scripted::new(Ok(Evaluation::NotMatched)));
        assert_eq!(apply(&shared, &Fields(vec!["x-test"]), &()), Some("vetoed"));
    }
}
