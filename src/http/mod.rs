//! HTTP transport adapter.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route for every method)
//!     → request.rs (request ID)
//!     → RequestContext (path, query + form parameters, headers)
//!     → Dispatcher on a blocking thread
//!     → DispatchOutcome → status 200 / 404 / 500 + text body
//! ```

pub mod request;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
