//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with a catch-all dispatch handler
//! - Wire up middleware (tracing, request ID)
//! - Translate HTTP requests into RequestContexts and outcomes back into
//!   responses
//! - Run handlers off the async workers, one blocking thread per request
//! - Observability (metrics, correlation IDs)

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::dispatch::{DispatchOutcome, QueryParams, RequestContext};
use crate::http::request::{request_id, UuidRequestId};
use crate::lifecycle::Application;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application>,
}

/// HTTP front end for a started application.
pub struct HttpServer {
    router: Router,
    app: Arc<Application>,
}

impl HttpServer {
    /// Create a new HTTP server serving `app`.
    pub fn new(app: Application) -> Self {
        let app = Arc::new(app);
        metrics::record_routes(app.routes().len());

        let state = AppState { app: app.clone() };
        let router = Self::build_router(state);
        Self { router, app }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// The configured router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn application(&self) -> &Arc<Application> {
        &self.app
    }

    /// Run the server until `shutdown` fires or Ctrl+C is received.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, routes = self.app.routes().len(), "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => {}
                    _ = ctrl_c() => {}
                }
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Ctrl+C handler unavailable");
        std::future::pending::<()>().await;
    }
}

/// Dispatch handler for every method and path.
async fn dispatch_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers).to_string();

    let request = build_request(&method, &uri, &headers, &body);
    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %request.path,
        "Dispatching request"
    );

    let app = state.app.clone();
    let outcome = match tokio::task::spawn_blocking(move || app.dispatch(&request)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Dispatch task failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("500 Exception, Detail: {}", e),
            )
                .into_response();
        }
    };

    metrics::record_request(method.as_str(), outcome.status, start_time);
    tracing::debug!(
        request_id = %request_id,
        status = outcome.status.http_code(),
        handler = outcome.handler.as_deref().unwrap_or("none"),
        "Request dispatched"
    );

    into_response(outcome)
}

/// Collects path, query and (for form posts) body parameters.
fn build_request(method: &Method, uri: &Uri, headers: &HeaderMap, body: &Bytes) -> RequestContext {
    let mut query = QueryParams::parse(uri.query().unwrap_or(""));

    let is_form = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false);
    if is_form {
        query.extend_from_encoded(body);
    }

    let mut request = RequestContext::new(method.as_str(), uri.path(), query);
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            request.insert_header(name.as_str(), value);
        }
    }
    request
}

fn into_response(outcome: DispatchOutcome) -> Response {
    let status = StatusCode::from_u16(outcome.status.http_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut response = Response::new(Body::from(outcome.body));
    *response.status_mut() = status;
    let response_headers = response.headers_mut();
    response_headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );

    for (name, value) in outcome.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            (Ok(name), Ok(value)) => {
                response_headers.insert(name, value);
            }
            _ => tracing::warn!(header = %name, "Dropping invalid response header"),
        }
    }

    response
}
