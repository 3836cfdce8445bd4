//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     Registry controllers (discovery order)
//!     → base path + method path, normalized
//!     → matcher.rs (compile anchored pattern)
//!     → route.rs (RouteEntry + positional ParameterBindings)
//!     → Freeze as immutable RouteTable
//!
//! Incoming path
//!     → matcher.rs (strip context, normalize)
//!     → router.rs (ordered scan)
//!     → Return: first matching RouteEntry or NoMatch
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (insertion order)

pub mod matcher;
pub mod route;
pub mod router;

pub use matcher::{normalize, strip_context, RoutePattern};
pub use route::{BindingSource, ParameterBinding, RouteEntry};
pub use router::{compose, RouteTable};
