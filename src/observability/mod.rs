//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! builder, mounter, server, handlers
//!     → tracing macros (structured fields)
//!     → logging.rs subscriber (EnvFilter + fmt)
//!     → stderr
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the request headers into handler logs
//! - `RUST_LOG` overrides the configured level

pub mod logging;
