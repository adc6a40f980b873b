//! Build-time error definitions.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::source::LoadError;
use crate::structure::leaf::LeafKind;

/// Errors that abort (or, in lenient mode, prune) a tree build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A directory could not be listed.
    #[error("failed to read directory {}: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A handler file exists but exports nothing usable.
    #[error("failed to load handler {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    /// A leaf name does not fit the kind it was built as.
    #[error("invalid {kind} leaf name `{name}` under {parent}")]
    InvalidLeafName {
        parent: String,
        name: String,
        kind: LeafKind,
    },

    /// A directory name leaves no path segment once brackets are removed (`[]`).
    #[error("invalid directory name `{name}` under {parent}")]
    InvalidSegmentName { parent: String, name: String },

    /// Two middleware files resolve to the same position in one node.
    #[error("middleware ordinal {ordinal} under {path} claimed by both `{existing}` and `{incoming}`")]
    MiddlewareOrdinalCollision {
        path: String,
        ordinal: usize,
        existing: String,
        incoming: String,
    },
}

/// Result type for tree building.
pub type BuildResult<T> = Result<T, BuildError>;
