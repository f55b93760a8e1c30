//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with introspection routes and the navigation fallback
//! - Wire up middleware (tracing, request ID, timeout, concurrency limit)
//!
//! # Design Decisions
//! - One semaphore bounds in-flight requests across every route
//! - Dispatch navigation requests to the route table
//! - Serve on a bound listener until shutdown

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    response::Response,
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin::setup_admin_router;
use crate::config::{EffectiveConfig, PreparedConfig, RuntimeConfig};
use crate::http::request::{MakeRequestUuidV4, RequestIdExt, X_REQUEST_ID};
use crate::http::response::{method_not_allowed, not_found, view_response};
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::metrics::{self, Outcome};
use crate::routing::{Resolution, RouteTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub effective: Arc<EffectiveConfig>,
}

/// HTTP dev server.
pub struct DevServer {
    router: Router,
    state: AppState,
}

impl DevServer {
    /// Create a server from a prepared configuration.
    pub fn new(prepared: PreparedConfig) -> Self {
        let PreparedConfig {
            effective,
            routes,
            runtime,
            ..
        } = prepared;

        let state = AppState {
            routes: Arc::new(routes),
            effective: Arc::new(effective),
        };

        let router = Self::build_router(&runtime, state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(runtime: &RuntimeConfig, state: AppState) -> Router {
        let router = Router::new()
            .merge(setup_admin_router())
            .fallback(navigate_handler)
            .with_state(state);
        with_middleware(router, runtime)
    }

    /// The fully layered router, for driving the server in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the effective config.
    pub fn effective(&self) -> &EffectiveConfig {
        &self.state.effective
    }

    /// Run the server, accepting connections on the given listener until a
    /// signal or a `Shutdown` trigger arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.state.routes.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wrap a router in the request middleware stack.
///
/// `Router::layer` layers every route separately, so the concurrency limit
/// shares one semaphore instead of creating one per route.
#[allow(deprecated)]
pub(crate) fn with_middleware(router: Router, runtime: &RuntimeConfig) -> Router {
    router
        .layer(GlobalConcurrencyLimitLayer::new(runtime.max_concurrent_requests))
        .layer(TimeoutLayer::new(Duration::from_secs(runtime.request_timeout_secs)))
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
        .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
        .layer(TraceLayer::new_for_http())
}

/// Navigation handler.
/// Resolves the path against the route table and serves the view shell.
async fn navigate_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id();
    let method = request.method();
    let path = request.uri().path();

    if *method != Method::GET && *method != Method::HEAD {
        tracing::debug!(request_id = %request_id, method = %method, path = %path, "Rejected non-navigation method");
        let response = method_not_allowed();
        metrics::record_request(method.as_str(), response.status().as_u16(), Outcome::Rejected, start_time);
        return response;
    }

    let (response, outcome) = match state.routes.resolve(path) {
        Resolution::Matched(entry) => {
            tracing::debug!(
                request_id = %request_id,
                path = %path,
                route = %entry.name,
                view = %entry.view,
                "Route matched"
            );
            (view_response(entry), Outcome::Matched)
        }
        Resolution::NotFound => {
            tracing::warn!(request_id = %request_id, path = %path, "No route matched");
            (not_found(), Outcome::NotFound)
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), outcome, start_time);
    response
}
