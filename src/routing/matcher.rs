//! Mount-path pattern matching.
//!
//! # Responsibilities
//! - Render mount paths (`/users/:id`) in axum's syntax (`/users/{id}`)
//! - Decide which path-scoped middleware covers a route pattern
//! - Decide which path-scoped middleware covers an unmatched request path
//!
//! # Design Decisions
//! - Segment-wise comparison: `/user` is not a prefix of `/users`
//! - A `:param` scope segment matches any single segment, for route patterns
//!   and request paths alike
//! - No regex; O(segments) per check

use axum::extract::Request;

/// Split a path into its non-empty segments.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Mount path of a child segment under `parent`.
///
/// ```
/// use file_router::routing::matcher::child_path;
///
/// assert_eq!(child_path("", "users", false), "/users");
/// assert_eq!(child_path("/users", "id", true), "/users/:id");
/// ```
pub fn child_path(parent: &str, name: &str, dynamic: bool) -> String {
    if dynamic {
        format!("{}/:{}", parent, name)
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Render a mount path in axum's route syntax. The empty path is `/`.
pub fn to_axum_path(path: &str) -> String {
    let rendered: Vec<String> = segments(path)
        .map(|segment| match segment.strip_prefix(':') {
            Some(param) => format!("{{{}}}", param),
            None => segment.to_string(),
        })
        .collect();
    format!("/{}", rendered.join("/"))
}

/// Whether `scope` covers a path whose segments are `actual`. A `:param`
/// scope segment matches any single segment.
fn covers<'a>(scope: &str, mut actual: impl Iterator<Item = &'a str>) -> bool {
    segments(scope).all(|expected| match actual.next() {
        Some(segment) => expected.starts_with(':') || expected == segment,
        None => false,
    })
}

/// Whether route pattern `pattern` lies at or below `scope`. Pattern
/// segments are compared as text, so `/users/:id` covers `/users/:slug`.
pub fn is_pattern_prefix(scope: &str, pattern: &str) -> bool {
    covers(scope, segments(pattern))
}

/// Matches request paths at or below a mount path.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn matches(&self, req: &Request) -> bool {
        self.matches_path(req.uri().path())
    }

    pub fn matches_path(&self, path: &str) -> bool {
        covers(&self.prefix, segments(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_to_axum_path() {
        assert_eq!(to_axum_path(""), "/");
        assert_eq!(to_axum_path("/"), "/");
        assert_eq!(to_axum_path("/users/:id/posts"), "/users/{id}/posts");
    }

    #[test]
    fn test_is_pattern_prefix() {
        assert!(is_pattern_prefix("", "/users"));
        assert!(is_pattern_prefix("/users", "/users/:id"));
        assert!(is_pattern_prefix("/users", "/users"));
        assert!(!is_pattern_prefix("/user", "/users"));
        assert!(!is_pattern_prefix("/users/:id", "/users"));
        assert!(is_pattern_prefix("/users/:id", "/users/:slug"));
    }

    #[test]
    fn test_dynamic_scope_agrees_for_routes_and_requests() {
        let scope = "/:id";
        let matcher = PathPrefixMatcher::new(scope);
        for path in ["/users", "/users/missing", "/users2"] {
            assert!(is_pattern_prefix(scope, path), "{path}");
            assert_eq!(matcher.matches_path(path), is_pattern_prefix(scope, path));
        }
        assert!(!is_pattern_prefix(scope, "/"));
        assert!(!matcher.matches_path("/"));
    }

    #[test]
    fn test_path_matcher() {
        let matcher = PathPrefixMatcher::new("/users/:id");
        assert!(matcher.matches_path("/users/42"));
        assert!(matcher.matches_path("/users/42/posts"));
        assert!(!matcher.matches_path("/users"));
        assert!(!matcher.matches_path("/teams/42"));

        let root = PathPrefixMatcher::new("");
        assert!(root.matches_path("/anything"));
    }

    #[test]
    fn test_matches_request() {
        let matcher = PathPrefixMatcher::new("/api");
        let req = Request::builder()
            .uri("http://example.com/api/v1")
            .body(Body::empty())
            .unwrap();
        assert!(matcher.matches(&req));

        let req = Request::builder()
            .uri("http://example.com/images")
            .body(Body::empty())
            .unwrap();
        assert!(!matcher.matches(&req));
    }
}
