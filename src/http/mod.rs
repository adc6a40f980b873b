//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum::serve, outer layers: trace, timeout, request ID)
//!     → request.rs (request ID set and propagated)
//!     → mounted router (routing::AxumSink)
//!         → handler.rs (middleware chain → endpoint)
//!         → response.rs (handler failures → error handler)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use handler::{Endpoint, ErrorHandler, Handler, HandlerResult, HandlerShape, Middleware};
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use response::{HandlerError, HandlerFailure};
pub use server::HttpServer;
