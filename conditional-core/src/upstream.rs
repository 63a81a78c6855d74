use std::future::Future;

/// Trait for calling the services around the orchestrator.
///
/// Used for both representation selection and the next handler. This trait is
/// framework-agnostic and can be implemented for any async service.
///
/// # Examples
///
/// ```rust,ignore
/// use conditional_core::Upstream;
/// use std::future::Ready;
///
/// struct FixedRepresentation {
///     response: MyResponse,
/// }
///
/// impl Upstream<MyRequest> for FixedRepresentation {
///     type Response = MyResponse;
///     type Future = Ready<Self::Response>;
///
///     fn call(&mut self, _req: MyRequest) -> Self::Future {
///         std::future::ready(self.response.clone())
///     }
/// }
/// ```
pub trait Upstream<Req> {
    /// The response type returned by the service
    type Response;

    /// The future that resolves to the response
    type Future: Future<Output = Self::Response> + Send;

    /// Call the service with the given request
    fn call(&mut self, req: Req) -> Self::Future;
}
