//! Route sink producing an `axum::Router`.
//!
//! # Responsibilities
//! - Turn each registered route into a method route wrapped by its chain
//! - Apply earlier path-scoped middleware to routes below their path
//! - Guard unmatched requests with the path-scoped middleware covering them
//!   before the not-found handler answers
//! - Route handler errors and panics to the error handler
//!
//! # Design Decisions
//! - Layer order: ancestor middleware outermost, then the node's own chain,
//!   then the endpoint
//! - Routes sharing a path are merged into one `MethodRouter`
//! - Sibling dynamic segments (`[id]` next to `[slug]`) are rejected by
//!   axum when the router is assembled

use std::collections::BTreeMap;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{from_fn, Next},
    response::{IntoResponse, Response},
    routing::{any, on, MethodFilter, MethodRouter},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::http::handler::{Endpoint, ErrorHandler, Middleware};
use crate::http::response::{panic_response, HandlerFailure};
use crate::routing::matcher::{is_pattern_prefix, to_axum_path, PathPrefixMatcher};
use crate::routing::{ChainLink, RouteSink};
use crate::structure::HttpMethod;

#[derive(Clone)]
struct ScopedMiddleware {
    matcher: PathPrefixMatcher,
    handler: Middleware,
}

/// Collects registrations and assembles them into an axum router.
#[derive(Default)]
pub struct AxumSink {
    routes: BTreeMap<String, MethodRouter>,
    scoped: Vec<ScopedMiddleware>,
    not_found: Option<Endpoint>,
    error_handler: Option<ErrorHandler>,
}

impl AxumSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct route paths registered.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Assemble the router.
    pub fn into_router(self) -> Router {
        let AxumSink {
            routes,
            scoped,
            not_found,
            error_handler,
        } = self;

        let mut router = Router::new();
        for (path, route) in routes {
            router = router.route(&path, route);
        }

        let mut fallback: MethodRouter = any(move |req: Request| {
            let not_found = not_found.clone();
            async move {
                match not_found {
                    Some(handler) => handler.call(req).await,
                    None => Ok(StatusCode::NOT_FOUND.into_response()),
                }
            }
        });
        for middleware in scoped.into_iter().rev() {
            fallback = wrap_scoped(fallback, middleware);
        }

        router
            .fallback_service(fallback)
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(from_fn(move |req: Request, next: Next| {
                let error_handler = error_handler.clone();
                async move { error_boundary(error_handler, req, next).await }
            }))
    }
}

impl RouteSink for AxumSink {
    fn register_route(
        &mut self,
        method: HttpMethod,
        path: &str,
        chain: &[ChainLink<'_>],
        handler: &Endpoint,
    ) {
        let mut route = endpoint_route(method_filter(method), handler.clone());
        for link in chain.iter().rev() {
            route = wrap(route, link.handler.clone());
        }

        let ancestors: Vec<Middleware> = self
            .scoped
            .iter()
            .filter(|scoped| is_pattern_prefix(scoped.matcher.prefix(), path))
            .map(|scoped| scoped.handler.clone())
            .collect();
        for middleware in ancestors.into_iter().rev() {
            route = wrap(route, middleware);
        }

        let key = to_axum_path(path);
        let merged = match self.routes.remove(&key) {
            Some(existing) => existing.merge(route),
            None => route,
        };
        self.routes.insert(key, merged);
    }

    fn register_path_middleware(&mut self, path: &str, chain: &[ChainLink<'_>]) {
        self.scoped
            .extend(chain.iter().map(|link| ScopedMiddleware {
                matcher: PathPrefixMatcher::new(path),
                handler: link.handler.clone(),
            }));
    }

    fn register_not_found(&mut self, handler: &Endpoint) {
        self.not_found = Some(handler.clone());
    }

    fn register_error_handler(&mut self, handler: &ErrorHandler) {
        self.error_handler = Some(handler.clone());
    }
}

fn method_filter(method: HttpMethod) -> MethodFilter {
    match method {
        HttpMethod::Get => MethodFilter::GET,
        HttpMethod::Post => MethodFilter::POST,
        HttpMethod::Put => MethodFilter::PUT,
        HttpMethod::Delete => MethodFilter::DELETE,
    }
}

fn endpoint_route(filter: MethodFilter, endpoint: Endpoint) -> MethodRouter {
    on(filter, move |req: Request| {
        let endpoint = endpoint.clone();
        async move { endpoint.call(req).await }
    })
}

fn wrap(route: MethodRouter, middleware: Middleware) -> MethodRouter {
    route.layer(from_fn(move |req: Request, next: Next| {
        let middleware = middleware.clone();
        async move { middleware.call(req, next).await }
    }))
}

fn wrap_scoped(route: MethodRouter, scoped: ScopedMiddleware) -> MethodRouter {
    route.layer(from_fn(move |req: Request, next: Next| {
        let scoped = scoped.clone();
        async move {
            if scoped.matcher.matches(&req) {
                scoped.handler.call(req, next).await
            } else {
                Ok(next.run(req).await)
            }
        }
    }))
}

/// Hand failed responses to the error handler, if one is installed.
async fn error_boundary(handler: Option<ErrorHandler>, req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    let failure = match response.extensions().get::<HandlerFailure>() {
        Some(failure) => failure.clone(),
        None => return response,
    };
    tracing::error!(error = %failure.error(), "Request failed");

    match handler {
        Some(handler) => handler.call(failure.0).await,
        None => response,
    }
}
