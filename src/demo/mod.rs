//! Demonstration components served by the binary.
//!
//! ```text
//! demo.controller.HelloController  (controller, /hello)
//!     hello_service ← helloService
//! demo.service.DefaultHelloService (service, implements HelloService)
//! ```

pub mod controller;
pub mod service;

pub use controller::HelloController;
pub use service::{DefaultHelloService, HelloService};

use crate::container::Catalog;

/// Catalog holding every demo component.
pub fn catalog() -> Catalog {
    Catalog::new()
        .with(controller::descriptor())
        .with(service::descriptor())
}
