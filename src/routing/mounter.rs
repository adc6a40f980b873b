//! Tree → router registration walk.

use crate::routing::matcher::child_path;
use crate::routing::{ChainLink, RouteSink};
use crate::structure::{Binding, HttpMethod, StructureTree, ROOT_PATH};

/// Mount `tree` at the router root.
pub fn mount<R: RouteSink + ?Sized>(tree: &StructureTree, sink: &mut R) {
    mount_at(tree, sink, "");
}

/// Mount `tree` below `base` (`""` or a path such as `/api`).
///
/// The root's `404` and `error` leaves are installed as the sink's
/// not-found and error handlers.
pub fn mount_at<R: RouteSink + ?Sized>(tree: &StructureTree, sink: &mut R, base: &str) {
    for leaf in tree.special_leaves() {
        match leaf.binding() {
            Binding::NotFound(handler) => sink.register_not_found(handler),
            Binding::Error(handler) => sink.register_error_handler(handler),
            Binding::Method(..) | Binding::Middleware { .. } => {}
        }
    }
    mount_node(tree, sink, base.trim_end_matches('/'));
}

fn mount_node<R: RouteSink + ?Sized>(tree: &StructureTree, sink: &mut R, path: &str) {
    let route_path = if path.is_empty() { ROOT_PATH } else { path };
    let chain: Vec<ChainLink<'_>> = tree
        .middleware_chain()
        .into_iter()
        .filter_map(|leaf| match leaf.binding() {
            Binding::Middleware {
                ordinal,
                display,
                handler,
            } => Some(ChainLink {
                name: display,
                ordinal: *ordinal,
                handler,
            }),
            _ => None,
        })
        .collect();

    for method in HttpMethod::ALL {
        if let Some(Binding::Method(_, handler)) = tree.method(method).map(|leaf| leaf.binding()) {
            tracing::debug!(
                method = %method,
                path = %route_path,
                middleware = chain.len(),
                "Registering route"
            );
            sink.register_route(method, route_path, &chain, handler);
        }
    }

    if !chain.is_empty() {
        tracing::debug!(path = %route_path, middleware = chain.len(), "Registering path middleware");
        sink.register_path_middleware(route_path, &chain);
    }

    for child in tree.sub_trees() {
        for leaf in child.special_leaves() {
            tracing::warn!(
                file = %leaf.path(),
                "Special handler below the mount root is not installed"
            );
        }
        mount_node(child, sink, &child_path(path, child.name(), child.is_dynamic()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{RecordingSink, Registration};
    use crate::http::handler::{Endpoint, Middleware};
    use crate::structure::StructureLeaf;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn endpoint() -> Endpoint {
        Endpoint::new(|_req| async { Ok(StatusCode::OK.into_response()) })
    }

    fn middleware() -> Middleware {
        Middleware::new(|req, next| async move { Ok(next.run(req).await) })
    }

    #[test]
    fn test_mount_order_within_node() {
        let mut tree = StructureTree::root();
        tree.add_child(StructureLeaf::middleware("auth", "/", 0, middleware()).unwrap())
            .unwrap();
        tree.add_child(StructureLeaf::method("post", "/", endpoint()).unwrap())
            .unwrap();
        tree.add_child(StructureLeaf::method("get", "/", endpoint()).unwrap())
            .unwrap();

        let mut sink = RecordingSink::new();
        mount(&tree, &mut sink);

        assert_eq!(
            sink.registrations(),
            &[
                Registration::route(HttpMethod::Get, "/", &["auth"]),
                Registration::route(HttpMethod::Post, "/", &["auth"]),
                Registration::path_middleware("/", &["auth"]),
            ]
        );
    }

    #[test]
    fn test_mount_at_base_path() {
        let mut users = StructureTree::new("users", "/");
        users
            .add_child(StructureLeaf::method("get", "/users", endpoint()).unwrap())
            .unwrap();
        let mut tree = StructureTree::root();
        tree.add_child(users).unwrap();

        let mut sink = RecordingSink::new();
        mount_at(&tree, &mut sink, "/api/");

        assert_eq!(
            sink.registrations(),
            &[Registration::route(HttpMethod::Get, "/api/users", &[])]
        );
    }

    #[test]
    fn test_nested_specials_not_installed() {
        let mut users = StructureTree::new("users", "/");
        users
            .add_child(StructureLeaf::not_found("/users", endpoint()))
            .unwrap();
        let mut tree = StructureTree::root();
        tree.add_child(users).unwrap();

        let mut sink = RecordingSink::new();
        mount(&tree, &mut sink);
        assert!(sink.registrations().is_empty());
    }
}
