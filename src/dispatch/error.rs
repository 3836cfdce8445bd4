//! Per-request failure conditions.

use thiserror::Error;

/// Failures raised while serving one request.
///
/// None of these escape [`Dispatcher::dispatch`](crate::dispatch::Dispatcher::dispatch);
/// they are folded into a not-found or server-error outcome.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no route matches {0}")]
    RouteNotFound(String),

    #[error("cannot convert parameter '{name}' value '{value}' to an integer: {source}")]
    ParameterConversion {
        name: String,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("argument {index} is not bound")]
    MissingArgument { index: usize },

    #[error("argument {index} is not a {expected} argument (found {found})")]
    ArgumentKind {
        index: usize,
        expected: &'static str,
        found: String,
    },

    #[error("handler failed: {0:#}")]
    Handler(anyhow::Error),

    #[error("handler panicked: {0}")]
    HandlerPanicked(String),
}

impl DispatchError {
    /// Lifts an error returned by a handler, keeping typed dispatch errors typed.
    pub(crate) fn from_handler(err: anyhow::Error) -> Self {
        match err.downcast::<DispatchError>() {
            Ok(typed) => typed,
            Err(other) => DispatchError::Handler(other),
        }
    }
}
