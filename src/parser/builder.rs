//! Depth-first directory walk producing a [`StructureTree`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http::handler::{Handler, HandlerShape};
use crate::source::{HandlerSource, LoadError};
use crate::structure::naming::{
    base_name, classify, is_ignored, parse_segment, Classification, SpecialKind,
};
use crate::structure::{BuildError, BuildResult, StructureLeaf, StructureTree};

/// How build errors below the root are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Any error aborts the whole build.
    #[default]
    Strict,
    /// The offending entry is logged and skipped.
    Lenient,
}

/// Builds a structure tree from a handler source.
pub struct TreeBuilder<'a, S: HandlerSource + ?Sized> {
    source: &'a S,
    mode: BuildMode,
}

impl<'a, S: HandlerSource + ?Sized> TreeBuilder<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            mode: BuildMode::Strict,
        }
    }

    pub fn mode(mut self, mode: BuildMode) -> Self {
        self.mode = mode;
        self
    }

    /// Walk `dir` and return its tree. The root directory must be listable
    /// in every mode.
    pub fn build(&self, dir: &Path) -> BuildResult<StructureTree> {
        let tree = self.populate(dir, StructureTree::root())?;
        tracing::debug!(
            dir = %dir.display(),
            leaves = tree.leaf_count(),
            "Structure tree built"
        );
        Ok(tree)
    }

    fn populate(&self, dir: &Path, mut tree: StructureTree) -> BuildResult<StructureTree> {
        let entries = self
            .source
            .list_entries(dir)
            .map_err(|source| BuildError::DirectoryRead {
                path: dir.to_path_buf(),
                source,
            })?;

        for entry in entries {
            if let Err(err) = self.add_entry(dir, &entry, &mut tree) {
                match self.mode {
                    BuildMode::Strict => return Err(err),
                    BuildMode::Lenient => {
                        tracing::error!(
                            node = %tree.path(),
                            entry = %entry,
                            error = %err,
                            "Skipping entry"
                        );
                    }
                }
            }
        }
        Ok(tree)
    }

    fn add_entry(&self, dir: &Path, entry: &str, tree: &mut StructureTree) -> BuildResult<()> {
        let entry_path = dir.join(entry);
        if self.source.is_directory(&entry_path) {
            if is_ignored(entry) {
                tracing::trace!(path = %entry_path.display(), "Ignoring directory");
                return Ok(());
            }
            if parse_segment(entry).name.is_empty() {
                return Err(BuildError::InvalidSegmentName {
                    parent: tree.path().to_string(),
                    name: entry.to_string(),
                });
            }
            let child = StructureTree::new(entry, tree.path());
            let child = self.populate(&entry_path, child)?;
            tree.add_child(child)
        } else {
            self.add_file(&entry_path, base_name(entry), tree)
        }
    }

    fn add_file(&self, path: &Path, name: &str, tree: &mut StructureTree) -> BuildResult<()> {
        if name.is_empty() || is_ignored(name) {
            tracing::trace!(path = %path.display(), "Ignoring file");
            return Ok(());
        }

        let handler = self
            .source
            .load_handler(path)
            .map_err(|source| BuildError::Load {
                path: path.to_path_buf(),
                source,
            })?;

        let parent = tree.path().to_string();
        let leaf = match classify(name) {
            Classification::Method(_) => {
                let handler = expect(path, handler, HandlerShape::Endpoint, Handler::into_endpoint)?;
                StructureLeaf::method(name, &parent, handler)?
            }
            Classification::Special(SpecialKind::NotFound) => {
                let handler = expect(path, handler, HandlerShape::Endpoint, Handler::into_endpoint)?;
                StructureLeaf::not_found(&parent, handler)
            }
            Classification::Special(SpecialKind::Error) => StructureLeaf::error(
                &parent,
                expect(path, handler, HandlerShape::ErrorHandler, Handler::into_error_handler)?,
            ),
            Classification::Middleware(parsed) => {
                let ordinal = parsed
                    .ordinal
                    .unwrap_or_else(|| tree.next_middleware_ordinal());
                let handler =
                    expect(path, handler, HandlerShape::Middleware, Handler::into_middleware)?;
                StructureLeaf::middleware(name, &parent, ordinal, handler)?
            }
        };

        tracing::debug!(
            path = %leaf.path(),
            kind = %leaf.kind(),
            ordinal = ?leaf.ordinal(),
            "Leaf attached"
        );
        tree.add_child(leaf)
    }
}

/// Unwrap the handler shape a file name requires.
fn expect<T>(
    path: &Path,
    handler: Handler,
    expected: HandlerShape,
    unwrap: fn(Handler) -> Result<T, HandlerShape>,
) -> BuildResult<T> {
    unwrap(handler).map_err(|found| BuildError::Load {
        path: path.to_path_buf(),
        source: LoadError::Shape { expected, found },
    })
}
