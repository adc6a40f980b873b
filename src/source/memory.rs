//! In-memory handler source.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

use crate::http::handler::Handler;
use crate::source::{HandlerSource, LoadError};

/// A directory tree held in memory.
///
/// Entries are listed in insertion order, which makes implicit middleware
/// ordinals fully controllable from tests.
///
/// ```
/// use file_router::http::handler::Handler;
/// use file_router::source::{HandlerSource, MemorySource};
/// use axum::response::IntoResponse;
///
/// let source = MemorySource::new("api")
///     .file("users/get.rs", Handler::endpoint(|_req| async { Ok("ok".into_response()) }));
///
/// assert_eq!(source.list_entries("api".as_ref()).unwrap(), vec!["users"]);
/// assert!(source.is_directory("api/users".as_ref()));
/// ```
#[derive(Debug, Clone)]
pub struct MemorySource {
    root: PathBuf,
    dirs: HashMap<PathBuf, Vec<String>>,
    files: HashMap<PathBuf, Option<Handler>>,
    unreadable: HashSet<PathBuf>,
}

impl MemorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mut dirs = HashMap::new();
        dirs.insert(root.clone(), Vec::new());
        Self {
            root,
            dirs,
            files: HashMap::new(),
            unreadable: HashSet::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Add a file exporting `handler`; parent directories are created.
    pub fn file(mut self, relative: &str, handler: impl Into<Handler>) -> Self {
        let path = self.insert_entry(relative);
        self.files.insert(path, Some(handler.into()));
        self
    }

    /// Add a file exporting nothing.
    pub fn blank_file(mut self, relative: &str) -> Self {
        let path = self.insert_entry(relative);
        self.files.insert(path, None);
        self
    }

    /// Add an empty directory.
    pub fn dir(mut self, relative: &str) -> Self {
        let path = self.insert_entry(relative);
        self.dirs.entry(path).or_default();
        self
    }

    /// Add a directory whose listing fails.
    pub fn unreadable(mut self, relative: &str) -> Self {
        let path = self.insert_entry(relative);
        self.dirs.remove(&path);
        self.unreadable.insert(path);
        self
    }

    fn insert_entry(&mut self, relative: &str) -> PathBuf {
        let parts: Vec<&str> = relative.split('/').filter(|p| !p.is_empty()).collect();
        let mut current = self.root.clone();
        for (idx, part) in parts.iter().enumerate() {
            let entries = self.dirs.entry(current.clone()).or_default();
            if !entries.iter().any(|existing| existing == part) {
                entries.push(part.to_string());
            }
            current = current.join(part);
            if idx + 1 < parts.len() {
                self.dirs.entry(current.clone()).or_default();
            }
        }
        current
    }
}

impl HandlerSource for MemorySource {
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<String>> {
        if self.unreadable.contains(dir) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is not readable", dir.display()),
            ));
        }
        self.dirs.get(dir).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", dir.display()),
            )
        })
    }

    fn is_directory(&self, path: &Path) -> bool {
        self.dirs.contains_key(path) || self.unreadable.contains(path)
    }

    fn load_handler(&self, path: &Path) -> Result<Handler, LoadError> {
        match self.files.get(path) {
            Some(Some(handler)) => Ok(handler.clone()),
            Some(None) => Err(LoadError::Missing(path.display().to_string())),
            None => Err(LoadError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_listing() {
        let source = MemorySource::new("api")
            .blank_file("b.rs")
            .dir("z")
            .blank_file("a.rs");
        assert_eq!(
            source.list_entries(Path::new("api")).unwrap(),
            vec!["b.rs", "z", "a.rs"]
        );
        assert!(source.is_directory(Path::new("api/z")));
        assert!(!source.is_directory(Path::new("api/a.rs")));
    }

    #[test]
    fn test_unreadable_directory() {
        let source = MemorySource::new("api").unreadable("secret");
        assert!(source.is_directory(Path::new("api/secret")));
        let err = source.list_entries(Path::new("api/secret")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_blank_file_is_missing_export() {
        let source = MemorySource::new("api").blank_file("get.rs");
        assert!(matches!(
            source.load_handler(Path::new("api/get.rs")),
            Err(LoadError::Missing(_))
        ));
    }
}
