use std::fmt::Debug;

use pin_project::pin_project;

#[allow(missing_docs)]
#[pin_project(project = StateProj)]
pub enum State<SelectFuture, NextFuture, Output> {
    /// Method check and active precondition collection
    Initial,
    /// Waiting for representation selection
    SelectRepresentation {
        #[pin]
        selection: SelectFuture,
    },
    /// Waiting for the next handler
    PollNext {
        #[pin]
        next: NextFuture,
    },
    /// Final state with response
    Response { response: Option<Output> },
}

impl<SelectFuture, NextFuture, Output> Debug for State<SelectFuture, NextFuture, Output> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            State::Initial => f.write_str("State::Initial"),
            State::SelectRepresentation { .. } => f.write_str("State::SelectRepresentation"),
            State::PollNext { .. } => f.write_str("State::PollNext"),
            State::Response { .. } => f.write_str("State::Response"),
        }
    }
}
