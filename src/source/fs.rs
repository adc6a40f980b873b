//! Disk-backed handler source.
//!
//! Files on disk mark where handlers live; the handlers themselves are
//! compiled code registered under the file's root-relative path without its
//! extension (`users/[id]/get.rs` → `users/[id]/get`).

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::http::handler::Handler;
use crate::source::{HandlerSource, LoadError};
use crate::structure::naming::base_name;

/// Compiled handlers keyed by root-relative, extension-less file path.
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for the file at `key`. Leading slashes and the
    /// extension of the last segment are ignored.
    pub fn register(&mut self, key: &str, handler: impl Into<Handler>) -> &mut Self {
        self.handlers.insert(normalize_key(key), handler.into());
        self
    }

    /// Builder-style [`Self::register`].
    pub fn with(mut self, key: &str, handler: impl Into<Handler>) -> Self {
        self.register(key, handler);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Handler> {
        self.handlers.get(&normalize_key(key))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Handler source reading a real directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
    registry: HandlerRegistry,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>, registry: HandlerRegistry) -> Self {
        Self {
            root: root.into(),
            registry,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl HandlerSource for FsSource {
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<String>> {
        read_sorted_entries(dir)
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn load_handler(&self, path: &Path) -> Result<Handler, LoadError> {
        ensure_file(path)?;
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let key = handler_key(relative);
        self.registry
            .get(&key)
            .cloned()
            .ok_or(LoadError::Missing(key))
    }
}

/// Entry names of `dir`, sorted.
pub fn read_sorted_entries(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}

/// Fail unless `path` is a readable regular file.
pub(crate) fn ensure_file(path: &Path) -> io::Result<()> {
    let metadata = fs::metadata(path)?;
    if metadata.is_file() {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a file", path.display()),
        ))
    }
}

/// Registry key of a root-relative file path.
pub fn handler_key(relative: &Path) -> String {
    let segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    normalize_key(&segments.join("/"))
}

fn normalize_key(key: &str) -> String {
    let key = key.trim_start_matches('/');
    match key.rsplit_once('/') {
        Some((dir, file)) => format!("{}/{}", dir, base_name(file)),
        None => base_name(key).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn ok() -> Handler {
        Handler::endpoint(|_req| async { Ok(StatusCode::OK.into_response()) })
    }

    #[test]
    fn test_handler_key() {
        assert_eq!(handler_key(Path::new("users/[id]/get.rs")), "users/[id]/get");
        assert_eq!(handler_key(Path::new("get.ts")), "get");
        assert_eq!(handler_key(Path::new("./0-cors.rs")), "0-cors");
    }

    #[test]
    fn test_registry_normalizes_keys() {
        let registry = HandlerRegistry::new().with("/users/get.rs", ok());
        assert!(registry.get("users/get").is_some());
        assert!(registry.get("users/get.ts").is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("get.rs"), "").unwrap();
        fs::write(dir.path().join("post.rs"), "").unwrap();

        let source = FsSource::new(dir.path(), HandlerRegistry::new().with("get", ok()));

        assert_eq!(
            source.list_entries(dir.path()).unwrap(),
            vec!["get.rs".to_string(), "post.rs".to_string()]
        );
        assert!(source.load_handler(&dir.path().join("get.rs")).is_ok());
        assert!(matches!(
            source.load_handler(&dir.path().join("post.rs")),
            Err(LoadError::Missing(key)) if key == "post"
        ));
        assert!(matches!(
            source.load_handler(&dir.path().join("put.rs")),
            Err(LoadError::Io(_))
        ));
    }
}
