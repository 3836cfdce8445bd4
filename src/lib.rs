//! Minimal MVC request-dispatch engine.
//!
//! Components are declared once in a [`Catalog`], then started in order:
//! discovery, instantiation, field injection and route compilation. The
//! resulting [`Application`] dispatches requests to controller methods.

pub mod config;
pub mod container;
pub mod demo;
pub mod dispatch;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::AppConfig;
pub use container::{Autowired, Catalog, ComponentDescriptor, HandlerMethod, ScalarType};
pub use dispatch::{DispatchOutcome, DispatchStatus, Invocation, QueryParams, Reply, RequestContext};
pub use http::HttpServer;
pub use lifecycle::{Application, BootError, Shutdown};
