//! Greeting service.

use std::sync::Arc;

use crate::container::ComponentDescriptor;

/// Capability interface the controller depends on.
pub trait HelloService: Send + Sync {
    fn greet(&self, name: &str) -> String;

    /// `None` on overflow.
    fn add(&self, a: i64, b: i64) -> Option<i64>;
}

/// Default implementation, bound as `defaultHelloService` and `helloService`.
#[derive(Debug, Default)]
pub struct DefaultHelloService;

impl HelloService for DefaultHelloService {
    fn greet(&self, name: &str) -> String {
        format!("Hello!My name is {}!", name)
    }

    fn add(&self, a: i64, b: i64) -> Option<i64> {
        a.checked_add(b)
    }
}

pub fn descriptor() -> ComponentDescriptor {
    ComponentDescriptor::service::<DefaultHelloService>("DefaultHelloService")
        .namespace("demo.service")
        .implements::<DefaultHelloService, dyn HelloService, _>("HelloService", |svc| {
            svc as Arc<dyn HelloService>
        })
}
