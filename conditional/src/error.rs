use thiserror::Error;

/// Boxed error from a collaborator service.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised around the evaluation of a conditional request.
///
/// None of these is fatal to the request: the orchestrator logs them and
/// forwards the request to the next handler.
#[derive(Debug, Error)]
pub enum Error {
    /// The representation-selection service failed.
    #[error("representation selection failed: {0}")]
    Selection(#[source] BoxError),
    /// The selected representation's body could not be read.
    #[error("failed to read representation body: {0}")]
    RepresentationBody(#[source] BoxError),
}

impl Error {
    /// Wraps a selection service error.
    pub fn selection<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::Selection(error.into())
    }

    /// Wraps a body collection error.
    pub fn representation_body<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::RepresentationBody(error.into())
    }
}
