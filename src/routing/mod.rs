//! Routing subsystem: mounting a structure tree onto a router.
//!
//! # Data Flow
//! ```text
//! StructureTree (built at startup)
//!     → mounter.rs (depth-first walk, fixed order per node):
//!         1. method leaves   → register_route(method, path, chain, handler)
//!         2. middleware      → register_path_middleware(path, chain)
//!         3. sub-trees       → recurse at path/name or path/:param
//!     → RouteSink
//!         router.rs    (axum::Router)
//!         recording.rs (ordered registration log)
//! ```
//!
//! # Design Decisions
//! - The mounter is the only code that mutates a router
//! - Mounting is pure given the tree: no filesystem access
//! - Special leaves of the mounted root become the router-wide not-found
//!   and error handlers

pub mod matcher;
pub mod mounter;
pub mod recording;
pub mod router;

pub use mounter::{mount, mount_at};
pub use recording::{RecordingSink, Registration};
pub use router::AxumSink;

use crate::http::handler::{Endpoint, ErrorHandler, Middleware};
use crate::structure::HttpMethod;

/// One middleware of an ordered chain.
#[derive(Debug, Clone, Copy)]
pub struct ChainLink<'a> {
    /// Display name (ordinal prefix removed).
    pub name: &'a str,
    pub ordinal: usize,
    pub handler: &'a Middleware,
}

/// The router collaborator the mounter registers onto.
///
/// Paths use `:param` for dynamic segments; the empty path is the root.
pub trait RouteSink {
    /// Register `handler` for `method` at `path`, behind `chain`.
    fn register_route(
        &mut self,
        method: HttpMethod,
        path: &str,
        chain: &[ChainLink<'_>],
        handler: &Endpoint,
    );

    /// Register `chain` for every request at or below `path`.
    fn register_path_middleware(&mut self, path: &str, chain: &[ChainLink<'_>]);

    fn register_not_found(&mut self, handler: &Endpoint);

    fn register_error_handler(&mut self, handler: &ErrorHandler);
}
