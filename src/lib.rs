//! Directory-driven HTTP routing.
//!
//! A directory tree is walked into a [`structure::StructureTree`] and the
//! tree is mounted onto a router: file names pick the HTTP method, special
//! handler, or ordered middleware; directory names become path segments.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod parser;
pub mod routing;
pub mod source;
pub mod structure;

pub use config::RouterConfig;
pub use http::{Endpoint, ErrorHandler, Handler, HandlerError, HttpServer, Middleware};
pub use lifecycle::{build_app, Shutdown};
pub use parser::{BuildMode, TreeBuilder};
pub use routing::{mount, mount_at, AxumSink, RecordingSink, RouteSink};
pub use source::{FsSource, HandlerRegistry, HandlerSource, MemorySource, StubSource};
pub use structure::{BuildError, StructureTree};
