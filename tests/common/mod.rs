//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};

use minimvc::config::ContextConfig;
use minimvc::container::HandlerResult;
use minimvc::dispatch::{QueryParams, Reply, RequestContext};
use minimvc::{demo, Application, HttpServer, Invocation, Shutdown};
use tokio::net::TcpListener;

/// Context settings with an optional context path.
pub fn context(context_path: &str) -> ContextConfig {
    ContextConfig {
        context_path: context_path.to_string(),
        ..ContextConfig::default()
    }
}

/// The demo application, started with default settings.
pub fn demo_app() -> Application {
    Application::bootstrap(&demo::catalog(), &ContextConfig::default()).unwrap()
}

/// Builds a GET request from `(name, value)` pairs.
pub fn get(path: &str, params: &[(&str, &str)]) -> RequestContext {
    let query = params
        .iter()
        .fold(QueryParams::new(), |q, (name, value)| q.with(*name, *value));
    RequestContext::get(path, query)
}

/// Controller that counts its invocations.
#[derive(Debug, Default)]
pub struct CountingController {
    pub hits: AtomicUsize,
}

impl CountingController {
    pub fn hit(&self, _inv: &mut Invocation<'_>) -> HandlerResult {
        let n = self.hits.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Reply::body(n))
    }

    pub fn count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Serves `app` on an ephemeral port. Returns the address and the shutdown handle.
pub async fn spawn_server(app: Application) -> (SocketAddr, Shutdown, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();

    let handle = tokio::spawn(async move {
        HttpServer::new(app).run(listener, receiver).await.unwrap();
    });
    (addr, shutdown, handle)
}
