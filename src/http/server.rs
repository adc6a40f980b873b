//! HTTP server setup.
//!
//! # Responsibilities
//! - Wrap the mounted router with the outer layers (tracing, timeout,
//!   request ID)
//! - Bind the server to a listener
//! - Stop accepting on shutdown and drain in-flight requests
//!
//! # Design Decisions
//! - The router is built once at startup and never mutated while serving
//! - Shutdown is driven by a `ShutdownSignal` so the caller decides what
//!   triggers it (signal, test harness)

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RouterConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::ShutdownSignal;

/// HTTP server for a mounted route tree.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
}

impl HttpServer {
    /// Create a server around an already mounted router.
    pub fn new(config: RouterConfig, routes: Router) -> Self {
        let router = Self::build_router(&config, routes);
        Self { router, config }
    }

    /// Add the outer middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RouterConfig, routes: Router) -> Router {
        routes
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mount_path = %self.config.routes.mount_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::X_REQUEST_ID;
    use axum::{body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_request_id_added() {
        let routes = Router::new().route("/", get(|| async { "ok" }));
        let server = HttpServer::new(RouterConfig::default(), routes);

        let response = server
            .router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key(X_REQUEST_ID));
    }

    #[tokio::test]
    async fn test_client_request_id_kept() {
        let routes = Router::new().route("/", get(|| async { "ok" }));
        let server = HttpServer::new(RouterConfig::default(), routes);

        let req = Request::builder()
            .uri("/")
            .header(X_REQUEST_ID, "client-id")
            .body(Body::empty())
            .unwrap();
        let response = server.router().oneshot(req).await.unwrap();
        assert_eq!(response.headers()[X_REQUEST_ID], "client-id");
    }
}
