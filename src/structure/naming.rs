//! File-naming conventions.
//!
//! Pure functions mapping raw directory entry names onto the routing
//! vocabulary:
//!
//! | Pattern                        | Meaning                         |
//! |--------------------------------|---------------------------------|
//! | `get`, `post`, `put`, `delete` | HTTP method handler             |
//! | `404`                          | not-found handler               |
//! | `error`                        | error handler                   |
//! | `_*`, `.*`                     | ignored                         |
//! | `<int>-<name>`, `<name>`       | middleware, optional ordinal    |
//! | `[name]` directory             | dynamic path parameter `name`   |

use std::fmt;

use serde::Serialize;

/// Name of the not-found special file.
pub const NOT_FOUND: &str = "404";

/// Name of the error special file.
pub const ERROR: &str = "error";

/// HTTP methods a method file can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// All methods, in mount order.
    pub const ALL: [HttpMethod; 4] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
    ];

    /// Match a stripped file name exactly.
    pub fn from_file_name(name: &str) -> Option<Self> {
        match name {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            _ => None,
        }
    }

    /// The file name binding this method.
    pub fn file_name(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name().to_ascii_uppercase())
    }
}

/// Handlers mounted outside normal method dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKind {
    NotFound,
    Error,
}

impl SpecialKind {
    pub fn from_file_name(name: &str) -> Option<Self> {
        match name {
            NOT_FOUND => Some(SpecialKind::NotFound),
            ERROR => Some(SpecialKind::Error),
            _ => None,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            SpecialKind::NotFound => NOT_FOUND,
            SpecialKind::Error => ERROR,
        }
    }
}

/// Middleware file name split into its ordinal hint and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiddlewareName {
    /// Explicit ordinal from a `<int>-` prefix.
    pub ordinal: Option<usize>,
    /// Name with the ordinal prefix removed.
    pub display: String,
}

/// Result of classifying a stripped file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Method(HttpMethod),
    Special(SpecialKind),
    Middleware(MiddlewareName),
}

/// Classify a stripped base name.
///
/// Priority: method names, then special names, then middleware.
///
/// ```
/// use file_router::structure::naming::{classify, Classification, HttpMethod};
///
/// assert_eq!(classify("get"), Classification::Method(HttpMethod::Get));
/// assert!(matches!(classify("1-logger"), Classification::Middleware(_)));
/// ```
pub fn classify(base_name: &str) -> Classification {
    if let Some(method) = HttpMethod::from_file_name(base_name) {
        return Classification::Method(method);
    }
    if let Some(special) = SpecialKind::from_file_name(base_name) {
        return Classification::Special(special);
    }
    Classification::Middleware(parse_middleware_name(base_name))
}

/// Parse the optional leading ordinal of a middleware file name.
///
/// The name is split on the first `-`. When the prefix parses as a
/// non-negative integer it becomes the ordinal and the remainder the display
/// name; otherwise the whole name is kept and no ordinal is set.
pub fn parse_middleware_name(base_name: &str) -> MiddlewareName {
    match base_name.split_once('-') {
        Some((prefix, rest)) => match prefix.parse::<usize>() {
            Ok(ordinal) => MiddlewareName {
                ordinal: Some(ordinal),
                display: rest.to_string(),
            },
            Err(_) => MiddlewareName {
                ordinal: None,
                display: base_name.to_string(),
            },
        },
        None => MiddlewareName {
            ordinal: None,
            display: base_name.to_string(),
        },
    }
}

/// A path segment derived from a directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub name: String,
    pub dynamic: bool,
}

/// Strip matching `[` `]` from a directory name.
///
/// ```
/// use file_router::structure::naming::parse_segment;
///
/// let seg = parse_segment("[slug]");
/// assert_eq!(seg.name, "slug");
/// assert!(seg.dynamic);
/// assert!(!parse_segment("users").dynamic);
/// ```
pub fn parse_segment(raw: &str) -> Segment {
    match raw.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(inner) => Segment {
            name: inner.to_string(),
            dynamic: true,
        },
        None => Segment {
            name: raw.to_string(),
            dynamic: false,
        },
    }
}

/// File name with its last extension removed.
pub fn base_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(idx) => &file_name[..idx],
    }
}

/// Entries reserved for non-handler files (shared helpers, dot-files).
pub fn is_ignored(name: &str) -> bool {
    name.starts_with('_') || name.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_priority() {
        assert_eq!(classify("post"), Classification::Method(HttpMethod::Post));
        assert_eq!(classify("delete"), Classification::Method(HttpMethod::Delete));
        assert_eq!(classify("404"), Classification::Special(SpecialKind::NotFound));
        assert_eq!(classify("error"), Classification::Special(SpecialKind::Error));
        // Case-sensitive match only
        assert!(matches!(classify("GET"), Classification::Middleware(_)));
    }

    #[test]
    fn test_middleware_ordinal() {
        let name = parse_middleware_name("0-cors");
        assert_eq!(name.ordinal, Some(0));
        assert_eq!(name.display, "cors");

        let name = parse_middleware_name("12-rate-limit");
        assert_eq!(name.ordinal, Some(12));
        assert_eq!(name.display, "rate-limit");
    }

    #[test]
    fn test_middleware_without_ordinal() {
        let name = parse_middleware_name("auth");
        assert_eq!(name.ordinal, None);
        assert_eq!(name.display, "auth");

        let name = parse_middleware_name("rate-limit");
        assert_eq!(name.ordinal, None);
        assert_eq!(name.display, "rate-limit");

        let name = parse_middleware_name("-1-neg");
        assert_eq!(name.ordinal, None);
        assert_eq!(name.display, "-1-neg");
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("get.rs"), "get");
        assert_eq!(base_name("get.test.ts"), "get.test");
        assert_eq!(base_name("auth"), "auth");
        assert_eq!(base_name(".env"), ".env");
    }

    #[test]
    fn test_segment() {
        assert_eq!(
            parse_segment("[id]"),
            Segment { name: "id".into(), dynamic: true }
        );
        // Unbalanced brackets stay static
        assert_eq!(
            parse_segment("[id"),
            Segment { name: "[id".into(), dynamic: false }
        );
    }

    #[test]
    fn test_ignored() {
        assert!(is_ignored("_helper"));
        assert!(is_ignored(".DS_Store"));
        assert!(!is_ignored("get"));
    }
}
