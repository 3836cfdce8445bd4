//! Request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! RequestContext (method, path, query)
//!     → dispatcher.rs MATCH: strip context, normalize, first matching route
//!     → binder.rs     BIND: positional arguments from query + contexts
//!     → dispatcher.rs INVOKE: handler under a panic boundary
//!     → dispatcher.rs RESPOND: DispatchOutcome (Ok | NotFound | Failed)
//! ```

pub mod binder;
pub mod context;
pub mod dispatcher;
pub mod error;

pub use context::{Argument, Invocation, QueryParams, Reply, RequestContext, ResponseContext};
pub use dispatcher::{DispatchOutcome, DispatchStatus, Dispatcher, NOT_FOUND_BODY};
pub use error::DispatchError;
