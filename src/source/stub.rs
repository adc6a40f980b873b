//! Placeholder handler source.
//!
//! Walks a real directory and fabricates a handler for every file from its
//! name alone, so a route tree can be previewed or served before any handler
//! code exists.

use std::io;
use std::path::{Path, PathBuf};

use axum::response::IntoResponse;

use crate::http::handler::Handler;
use crate::http::request::RequestIdExt;
use crate::source::fs::{ensure_file, read_sorted_entries};
use crate::source::{HandlerSource, LoadError};
use crate::structure::naming::{base_name, classify, Classification, SpecialKind};

/// Handler source answering every file with a stub of the right shape.
#[derive(Debug, Clone)]
pub struct StubSource {
    root: PathBuf,
}

impl StubSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl HandlerSource for StubSource {
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<String>> {
        read_sorted_entries(dir)
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn load_handler(&self, path: &Path) -> Result<Handler, LoadError> {
        ensure_file(path)?;
        let file = path
            .strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string();
        let name = path
            .file_name()
            .map(|n| base_name(&n.to_string_lossy()).to_string())
            .unwrap_or_default();

        let handler = match classify(&name) {
            Classification::Method(_) | Classification::Special(SpecialKind::NotFound) => {
                Handler::endpoint(move |req| {
                    let file = file.clone();
                    async move {
                        tracing::debug!(
                            request_id = req.request_id().unwrap_or("unknown"),
                            method = %req.method(),
                            path = %req.uri().path(),
                            file = %file,
                            "Stub endpoint"
                        );
                        Ok(format!("{} {} -> {}\n", req.method(), req.uri().path(), file)
                            .into_response())
                    }
                })
            }
            Classification::Special(SpecialKind::Error) => Handler::error_handler(|err| async move {
                format!("error: {}\n", err).into_response()
            }),
            Classification::Middleware(_) => Handler::middleware(move |req, next| {
                let file = file.clone();
                async move {
                    tracing::debug!(path = %req.uri().path(), file = %file, "Stub middleware");
                    Ok(next.run(req).await)
                }
            }),
        };
        Ok(handler)
    }
}
