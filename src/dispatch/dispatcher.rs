//! Request dispatch.
//!
//! # Responsibilities
//! - Match the inbound path against the route table
//! - Bind query parameters and contexts to handler arguments
//! - Invoke the handler and render its return value
//! - Contain every per-request failure at this boundary
//!
//! # Design Decisions
//! - Per request: MATCH → BIND → INVOKE → RESPOND
//! - MATCH misses become a not-found outcome; the handler never runs
//! - BIND/INVOKE failures, handler panics included, become a server-error
//!   outcome describing the failure
//! - No timeouts or retries; a handler blocks the calling thread

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::container::descriptor::ReturnKind;
use crate::dispatch::binder::bind;
use crate::dispatch::context::{Invocation, Reply, RequestContext, ResponseContext};
use crate::dispatch::error::DispatchError;
use crate::routing::matcher::{normalize, strip_context};
use crate::routing::route::RouteEntry;
use crate::routing::router::RouteTable;

/// Body written when no route matches.
pub const NOT_FOUND_BODY: &str = "404 Not Found!";

/// Outcome class; the transport maps it to a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    Ok,
    NotFound,
    Failed,
}

impl DispatchStatus {
    pub fn http_code(self) -> u16 {
        match self {
            DispatchStatus::Ok => 200,
            DispatchStatus::NotFound => 404,
            DispatchStatus::Failed => 500,
        }
    }
}

/// What a dispatch produced.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub status: DispatchStatus,
    pub body: String,
    /// Headers the handler set on the response context.
    pub headers: Vec<(String, String)>,
    /// `controller.method` of the selected route, if any.
    pub handler: Option<String>,
}

impl DispatchOutcome {
    fn from_error(err: &DispatchError, handler: Option<String>) -> Self {
        match err {
            DispatchError::RouteNotFound(_) => Self {
                status: DispatchStatus::NotFound,
                body: NOT_FOUND_BODY.to_string(),
                headers: Vec::new(),
                handler,
            },
            other => Self {
                status: DispatchStatus::Failed,
                body: format!("500 Exception, Detail: {}", other),
                headers: Vec::new(),
                handler,
            },
        }
    }
}

/// Serves requests against a frozen route table.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    routes: Arc<RouteTable>,
    context_path: String,
}

impl Dispatcher {
    pub fn new(routes: Arc<RouteTable>, context_path: impl Into<String>) -> Self {
        Self {
            routes,
            context_path: context_path.into(),
        }
    }

    /// Serves one request. Never fails; errors become the outcome.
    pub fn dispatch(&self, request: &RequestContext) -> DispatchOutcome {
        let path = self.route_path(&request.path);
        let Some(route) = self.routes.find(&path) else {
            tracing::debug!(path = %path, "No route matched");
            return DispatchOutcome::from_error(&DispatchError::RouteNotFound(path), None);
        };

        match Self::invoke(route, request) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(path = %path, handler = %route.handler_name(), error = %err, "Dispatch failed");
                DispatchOutcome::from_error(&err, Some(route.handler_name()))
            }
        }
    }

    /// Like [`dispatch`](Self::dispatch) but hands the typed error back.
    pub fn try_dispatch(&self, request: &RequestContext) -> Result<DispatchOutcome, DispatchError> {
        let path = self.route_path(&request.path);
        let route = self
            .routes
            .find(&path)
            .ok_or(DispatchError::RouteNotFound(path))?;
        Self::invoke(route, request)
    }

    /// The route an inbound path would be served by.
    pub fn resolve(&self, path: &str) -> Option<&RouteEntry> {
        self.routes.find(&self.route_path(path))
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    fn route_path(&self, path: &str) -> String {
        normalize(strip_context(path, &self.context_path))
    }

    fn invoke(route: &RouteEntry, request: &RequestContext) -> Result<DispatchOutcome, DispatchError> {
        let args = bind(route, &request.query)?;

        let mut response = ResponseContext::new();
        let reply = {
            let mut invocation = Invocation::new(args, request, &mut response);
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                route.method.invoke(route.instance(), &mut invocation)
            }));
            match result {
                Ok(returned) => returned.map_err(DispatchError::from_handler)?,
                Err(payload) => return Err(DispatchError::HandlerPanicked(panic_message(payload.as_ref()))),
            }
        };

        match (route.method.returns, reply) {
            (ReturnKind::Value, Reply::Body(text)) => response.write(&text),
            (ReturnKind::Void, Reply::Body(_)) => {
                tracing::debug!(handler = %route.handler_name(), "Void handler returned a value, ignored");
            }
            (_, Reply::Void) => {}
        }

        let (body, headers) = response.into_parts();
        Ok(DispatchOutcome {
            status: DispatchStatus::Ok,
            body,
            headers,
            handler: Some(route.handler_name()),
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
