//! Handler source subsystem: the filesystem/module collaborator.
//!
//! # Data Flow
//! ```text
//! TreeBuilder
//!     → list_entries(dir)     directory names, in enumeration order
//!     → is_directory(path)    recurse or treat as handler file
//!     → load_handler(path)    Handler exported for the file
//! ```
//!
//! # Implementations
//! - `fs.rs`: real directory + registry of compiled handlers
//! - `memory.rs`: in-memory tree, no disk access
//! - `stub.rs`: real directory, placeholder handlers (CLI preview)
//!
//! # Design Decisions
//! - Injected into the builder instead of touching `std::fs` directly, so
//!   builds are testable without a disk
//! - Enumeration order matters only for implicit middleware ordinals; the
//!   disk-backed sources sort entries so builds are repeatable

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::http::handler::{Handler, HandlerShape};

pub mod fs;
pub mod memory;
pub mod stub;

pub use fs::{FsSource, HandlerRegistry};
pub use memory::MemorySource;
pub use stub::StubSource;

/// Errors resolving the handler of a file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file exports no handler.
    #[error("no handler exported for `{0}`")]
    Missing(String),

    /// The export does not have the shape the file name requires.
    #[error("expected {expected} export, found {found}")]
    Shape {
        expected: HandlerShape,
        found: HandlerShape,
    },

    /// The file could not be accessed.
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Directory lister and handler loader consumed by the tree builder.
pub trait HandlerSource {
    /// Names of the entries in `dir`.
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// Whether `path` is a directory.
    fn is_directory(&self, path: &Path) -> bool;

    /// The handler exported by the file at `path`.
    fn load_handler(&self, path: &Path) -> Result<Handler, LoadError>;
}
