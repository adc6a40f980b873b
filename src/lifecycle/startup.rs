//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the structure tree from the configured handler source
//! - Reject trees axum cannot route
//! - Mount the tree and bind the listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when the route table is complete)

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{RouterConfig, RoutesConfig};
use crate::http::HttpServer;
use crate::lifecycle::signals::spawn_signal_listener;
use crate::lifecycle::Shutdown;
use crate::parser::TreeBuilder;
use crate::routing::{mount_at, AxumSink};
use crate::source::HandlerSource;
use crate::structure::{BuildError, StructureTree};

/// Errors that stop the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("directory `{path}` has more than one dynamic child: {names:?}")]
    ConflictingParams { path: String, names: Vec<String> },

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Mount `tree` under `mount_path` onto a fresh axum router.
pub fn mount_router(tree: &StructureTree, mount_path: &str) -> Router {
    let mut sink = AxumSink::new();
    mount_at(tree, &mut sink, mount_path);
    tracing::debug!(routes = sink.route_count(), "Router assembled");
    sink.into_router()
}

/// Build the tree described by `config` and mount it.
pub fn build_app<S: HandlerSource + ?Sized>(
    config: &RoutesConfig,
    source: &S,
) -> Result<Router, StartupError> {
    let tree = TreeBuilder::new(source)
        .mode(config.mode)
        .build(&config.root_dir)?;
    check_dynamic_siblings(&tree)?;

    tracing::info!(
        root_dir = %config.root_dir.display(),
        mount_path = %config.mount_path,
        leaves = tree.leaf_count(),
        mode = ?config.mode,
        "Route tree built"
    );

    Ok(mount_router(&tree, &config.mount_path))
}

/// Two dynamic directories in one node map to the same route pattern.
fn check_dynamic_siblings(tree: &StructureTree) -> Result<(), StartupError> {
    let children = tree.sub_trees();
    let dynamic: Vec<String> = children
        .iter()
        .filter(|child| child.is_dynamic())
        .map(|child| child.name().to_string())
        .collect();
    if dynamic.len() > 1 {
        return Err(StartupError::ConflictingParams {
            path: tree.path().to_string(),
            names: dynamic,
        });
    }
    children.into_iter().try_for_each(check_dynamic_siblings)
}

/// Build, bind and serve until SIGINT/SIGTERM.
pub async fn serve<S: HandlerSource + ?Sized>(
    config: RouterConfig,
    source: &S,
) -> Result<(), StartupError> {
    let routes = build_app(&config.routes, source)?;

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    let shutdown = Shutdown::new();
    let signal = shutdown.signal();
    spawn_signal_listener(shutdown);

    HttpServer::new(config, routes).run(listener, signal).await?;
    Ok(())
}
