//! Capabilities the orchestrator needs from requests and representations.

/// A request that may carry precondition fields.
///
/// Implemented by protocol bindings (e.g. `ConditionalHttpRequest` in
/// `conditional-http`). The orchestrator never looks at protocol details
/// directly; it only asks these questions.
pub trait ConditionalRequest {
    /// Request passed to representation selection.
    ///
    /// A copy of this request without any precondition fields.
    type Head;

    /// Whether precondition fields must be ignored for this request's method.
    ///
    /// True for methods that neither select nor modify a representation
    /// (`CONNECT`, `OPTIONS`, `TRACE`).
    fn ignores_preconditions(&self) -> bool;

    /// Whether the request carries `field`, compared case-insensitively.
    fn has_field(&self, field: &str) -> bool;

    /// Builds the request head sent to representation selection.
    ///
    /// The standard precondition fields and every field in `fields` are
    /// removed; everything else is preserved.
    fn without_fields<'a, I>(&self, fields: I) -> Self::Head
    where
        I: IntoIterator<Item = &'a str>;
}

/// The result of representation selection.
pub trait SelectedRepresentation {
    /// Whether preconditions may be evaluated against this representation.
    ///
    /// Preconditions only apply when the unconditional response would have
    /// been a 2xx (Successful) or 412 (Precondition Failed).
    fn is_pre_evaluable(&self) -> bool;
}
