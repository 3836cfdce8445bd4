//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → SCAN → INSTANTIATE → INJECT → COMPILE_ROUTES → READY
//!     → bind listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight requests → Exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then container, then routes, then listener
//! - Any BootError aborts before the listener exists (no partial serving)

pub mod error;
pub mod shutdown;
pub mod startup;

pub use error::BootError;
pub use shutdown::Shutdown;
pub use startup::{Application, StartupStage};
