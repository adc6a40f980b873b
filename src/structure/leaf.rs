//! Leaf nodes: one handler file each.

use std::fmt;

use axum::http::StatusCode;
use serde::Serialize;

use crate::http::handler::{Endpoint, ErrorHandler, Middleware};
use crate::structure::error::{BuildError, BuildResult};
use crate::structure::naming::{self, Classification, HttpMethod, SpecialKind};

/// Leaf classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafKind {
    Method,
    Middleware,
    Special,
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafKind::Method => f.write_str("method"),
            LeafKind::Middleware => f.write_str("middleware"),
            LeafKind::Special => f.write_str("special"),
        }
    }
}

/// What a leaf binds. The variant fixes the leaf's kind for its lifetime.
#[derive(Debug, Clone)]
pub enum Binding {
    Method(HttpMethod, Endpoint),
    Middleware {
        ordinal: usize,
        display: String,
        handler: Middleware,
    },
    NotFound(Endpoint),
    Error(ErrorHandler),
}

/// A terminal handler binding.
#[derive(Debug, Clone)]
pub struct StructureLeaf {
    name: String,
    path: String,
    binding: Binding,
}

impl StructureLeaf {
    /// Create a method leaf. `name` must be one of `get|post|put|delete`.
    pub fn method(name: &str, parent_path: &str, handler: Endpoint) -> BuildResult<Self> {
        let method = HttpMethod::from_file_name(name)
            .ok_or_else(|| invalid(name, parent_path, LeafKind::Method))?;
        Ok(Self::with_binding(name, parent_path, Binding::Method(method, handler)))
    }

    /// Create a middleware leaf at a resolved ordinal.
    ///
    /// Reserved method/special names and names whose ordinal prefix leaves
    /// nothing behind (`3-`) are rejected.
    pub fn middleware(
        name: &str,
        parent_path: &str,
        ordinal: usize,
        handler: Middleware,
    ) -> BuildResult<Self> {
        let display = match naming::classify(name) {
            Classification::Middleware(parsed) if !parsed.display.is_empty() => parsed.display,
            _ => return Err(invalid(name, parent_path, LeafKind::Middleware)),
        };
        Ok(Self::with_binding(
            name,
            parent_path,
            Binding::Middleware {
                ordinal,
                display,
                handler,
            },
        ))
    }

    /// Create the `404` leaf. Its responses always carry 404 Not Found.
    pub fn not_found(parent_path: &str, handler: Endpoint) -> Self {
        Self::with_binding(
            naming::NOT_FOUND,
            parent_path,
            Binding::NotFound(handler.with_status(StatusCode::NOT_FOUND)),
        )
    }

    /// Create the `error` leaf. Its responses always carry 500.
    pub fn error(parent_path: &str, handler: ErrorHandler) -> Self {
        Self::with_binding(
            naming::ERROR,
            parent_path,
            Binding::Error(handler.with_status(StatusCode::INTERNAL_SERVER_ERROR)),
        )
    }

    fn with_binding(name: &str, parent_path: &str, binding: Binding) -> Self {
        Self {
            name: name.to_string(),
            path: join_path(parent_path, name),
            binding,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    pub fn kind(&self) -> LeafKind {
        match self.binding {
            Binding::Method(..) => LeafKind::Method,
            Binding::Middleware { .. } => LeafKind::Middleware,
            Binding::NotFound(_) | Binding::Error(_) => LeafKind::Special,
        }
    }

    pub fn special_kind(&self) -> Option<SpecialKind> {
        match self.binding {
            Binding::NotFound(_) => Some(SpecialKind::NotFound),
            Binding::Error(_) => Some(SpecialKind::Error),
            _ => None,
        }
    }

    /// Chain position, for middleware leaves.
    pub fn ordinal(&self) -> Option<usize> {
        match self.binding {
            Binding::Middleware { ordinal, .. } => Some(ordinal),
            _ => None,
        }
    }

    /// Name without the ordinal prefix.
    pub fn display_name(&self) -> &str {
        match &self.binding {
            Binding::Middleware { display, .. } => display,
            _ => &self.name,
        }
    }
}

/// Join a parent node path and a child name.
pub(crate) fn join_path(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{}{}", parent, name)
    } else {
        format!("{}/{}", parent, name)
    }
}

fn invalid(name: &str, parent_path: &str, kind: LeafKind) -> BuildError {
    BuildError::InvalidLeafName {
        parent: parent_path.to_string(),
        name: name.to_string(),
        kind,
    }
}
