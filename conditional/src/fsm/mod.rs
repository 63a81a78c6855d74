//! Finite State Machine for conditional request evaluation.
//!
//! Filters active preconditions, selects the representation once, checks the
//! status, applies preconditions in precedence order and either responds or
//! forwards the request to the next handler.

mod future;
mod states;

pub use future::ConditionalFuture;
pub use states::State;
