use conditional_core::PreconditionSet;
use conditional_http::{ConfigError, HttpPrecondition, PreconditionConfig, standard_preconditions};
use tower::Layer;

use crate::service::ConditionalService;

/// Tower layer adding conditional request handling to a service.
///
/// Holds the representation selector and the precondition set; both are
/// cloned into every service the layer produces.
pub struct Conditional<Sel, P = HttpPrecondition> {
    selector: Sel,
    preconditions: PreconditionSet<P>,
}

impl<Sel> Conditional<Sel> {
    /// Creates a layer evaluating the five standard preconditions.
    pub fn new(selector: Sel) -> Self {
        Conditional {
            selector,
            preconditions: standard_preconditions(),
        }
    }
}

impl Conditional<NotSet> {
    /// Starts a builder with the standard preconditions and no selector.
    pub fn builder() -> ConditionalBuilder<NotSet> {
        ConditionalBuilder::default()
    }
}

impl<Sel, P> Conditional<Sel, P> {
    /// The preconditions evaluated by this layer.
    pub fn preconditions(&self) -> &PreconditionSet<P> {
        &self.preconditions
    }
}

impl<Sel, P> Clone for Conditional<Sel, P>
where
    Sel: Clone,
{
    fn clone(&self) -> Self {
        Conditional {
            selector: self.selector.clone(),
            preconditions: self.preconditions.clone(),
        }
    }
}

impl<S, Sel, P> Layer<S> for Conditional<Sel, P>
where
    Sel: Clone,
{
    type Service = ConditionalService<S, Sel, P>;

    fn layer(&self, upstream: S) -> Self::Service {
        ConditionalService::new(upstream, self.selector.clone(), self.preconditions.clone())
    }
}

/// Placeholder for a builder component that has not been provided yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotSet;

/// Builder for [`Conditional`].
///
/// The selector has no default; a layer built while it is still [`NotSet`]
/// cannot wrap a service.
pub struct ConditionalBuilder<Sel, P = HttpPrecondition> {
    selector: Sel,
    preconditions: PreconditionSet<P>,
}

impl<Sel, P> ConditionalBuilder<Sel, P> {
    /// Sets the representation selection service.
    pub fn selector<NS>(self, selector: NS) -> ConditionalBuilder<NS, P> {
        ConditionalBuilder {
            selector,
            preconditions: self.preconditions,
        }
    }

    /// Replaces the precondition set.
    pub fn preconditions<NP>(self, preconditions: PreconditionSet<NP>) -> ConditionalBuilder<Sel, NP> {
        ConditionalBuilder {
            selector: self.selector,
            preconditions,
        }
    }

    /// Builds the layer.
    pub fn build(self) -> Conditional<Sel, P> {
        Conditional {
            selector: self.selector,
            preconditions: self.preconditions,
        }
    }
}

impl<Sel> ConditionalBuilder<Sel, HttpPrecondition> {
    /// Replaces the precondition set with one built from configuration.
    pub fn config(self, config: PreconditionConfig) -> Result<Self, ConfigError> {
        Ok(self.preconditions(config.into_set()?))
    }
}

impl Default for ConditionalBuilder<NotSet> {
    fn default() -> Self {
        Self {
            selector: NotSet,
            preconditions: standard_preconditions(),
        }
    }
}
