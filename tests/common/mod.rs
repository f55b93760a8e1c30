//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use map_dev_server::config::{DevServerConfig, PreparedConfig};
use map_dev_server::{DevServer, Shutdown};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceExt;

/// Canonical config, prepared.
pub fn prepared_canonical() -> PreparedConfig {
    DevServerConfig::default().prepare().unwrap()
}

/// Layered router for in-process requests.
#[allow(dead_code)]
pub fn router(prepared: PreparedConfig) -> Router {
    DevServer::new(prepared).router()
}

/// Send one request through the router.
#[allow(dead_code)]
pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

#[allow(dead_code)]
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Serve on a real socket. Returns the address and the server task.
#[allow(dead_code)]
pub async fn spawn_server(
    prepared: PreparedConfig,
    shutdown: &Shutdown,
) -> (SocketAddr, JoinHandle<Result<(), std::io::Error>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = DevServer::new(prepared);
    let rx = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, rx).await });
    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, handle)
}
