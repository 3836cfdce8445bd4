//! The `/hello` controller.

use std::sync::Arc;

use anyhow::Context;

use crate::container::{Autowired, ComponentDescriptor, HandlerMethod, HandlerResult, ScalarType};
use crate::demo::service::HelloService;
use crate::dispatch::{Invocation, Reply};

#[derive(Debug, Default)]
pub struct HelloController {
    hello_service: Autowired<dyn HelloService>,
}

impl HelloController {
    fn service(&self) -> anyhow::Result<&Arc<dyn HelloService>> {
        self.hello_service.get().context("helloService is not wired")
    }

    /// `sayHello(request, response, name)`: writes the greeting to the response.
    pub fn say_hello(&self, inv: &mut Invocation<'_>) -> HandlerResult {
        let greeting = self.service()?.greet(inv.text(2)?);
        inv.response(1)?.write(&greeting);
        Ok(Reply::Void)
    }

    /// `add(request, response, a, b)`: writes `a + b = <sum>` to the response.
    pub fn add(&self, inv: &mut Invocation<'_>) -> HandlerResult {
        let (a, b) = (inv.integer(2)?, inv.integer(3)?);
        let sum = self
            .service()?
            .add(a, b)
            .with_context(|| format!("{} + {} overflows", a, b))?;
        inv.response(1)?.write(&format!("a + b = {}", sum));
        Ok(Reply::Void)
    }

    /// `greeting(name) -> String`: returns the greeting as the body.
    pub fn greeting(&self, inv: &mut Invocation<'_>) -> HandlerResult {
        Ok(Reply::body(self.service()?.greet(inv.text(0)?)))
    }
}

pub fn descriptor() -> ComponentDescriptor {
    ComponentDescriptor::controller::<HelloController>("HelloController")
        .namespace("demo.controller")
        .request_mapping("/hello")
        .autowired("hello_service", "HelloService", None, |c: &HelloController| &c.hello_service)
        .route(
            HandlerMethod::new("sayHello", "/sayHello", HelloController::say_hello)
                .request()
                .response()
                .param("name", ScalarType::Text)
                .returns_void(),
        )
        .route(
            HandlerMethod::new("add", "/add", HelloController::add)
                .request()
                .response()
                .param("a", ScalarType::Integer)
                .param("b", ScalarType::Integer)
                .returns_void(),
        )
        .route(
            HandlerMethod::new("greeting", "/greeting", HelloController::greeting)
                .param("name", ScalarType::Text),
        )
}
