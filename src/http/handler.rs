//! Handler shapes bound by leaf files.
//!
//! # Responsibilities
//! - Type-erase user handlers so they can live in the structure tree
//! - Distinguish the three shapes a file may export (endpoint, middleware,
//!   error handler)
//! - Provide the status-forcing wrappers used by special files
//!
//! # Design Decisions
//! - Handlers are `Arc`'d closures: cheap to clone into every route
//! - Endpoints and middleware return `HandlerResult`; an `Err` is routed to
//!   the error handler by the serving layer

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use futures_util::future::{BoxFuture, FutureExt};
use serde::Serialize;

use crate::http::response::HandlerError;

/// Outcome of an endpoint or middleware.
pub type HandlerResult = Result<Response, HandlerError>;

type EndpointFn = dyn Fn(Request) -> BoxFuture<'static, HandlerResult> + Send + Sync;
type MiddlewareFn = dyn Fn(Request, Next) -> BoxFuture<'static, HandlerResult> + Send + Sync;
type ErrorHandlerFn = dyn Fn(Arc<HandlerError>) -> BoxFuture<'static, Response> + Send + Sync;

/// Terminal request handler (method files and `404`).
#[derive(Clone)]
pub struct Endpoint(Arc<EndpointFn>);

impl Endpoint {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self(Arc::new(move |req| f(req).boxed()))
    }

    pub fn call(&self, req: Request) -> BoxFuture<'static, HandlerResult> {
        (self.0)(req)
    }

    /// Wrap so every successful response carries `status`.
    pub fn with_status(self, status: StatusCode) -> Self {
        Self::new(move |req| {
            let inner = self.clone();
            async move {
                let mut response = inner.call(req).await?;
                *response.status_mut() = status;
                Ok(response)
            }
        })
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Endpoint(..)")
    }
}

/// Request middleware; calls `next` to continue the chain.
#[derive(Clone)]
pub struct Middleware(Arc<MiddlewareFn>);

impl Middleware {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self(Arc::new(move |req, next| f(req, next).boxed()))
    }

    pub fn call(&self, req: Request, next: Next) -> BoxFuture<'static, HandlerResult> {
        (self.0)(req, next)
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Middleware(..)")
    }
}

/// Handler for failed requests (`error` files).
#[derive(Clone)]
pub struct ErrorHandler(Arc<ErrorHandlerFn>);

impl ErrorHandler {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Arc<HandlerError>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self(Arc::new(move |err| f(err).boxed()))
    }

    pub fn call(&self, err: Arc<HandlerError>) -> BoxFuture<'static, Response> {
        (self.0)(err)
    }

    /// Wrap so every response carries `status`.
    pub fn with_status(self, status: StatusCode) -> Self {
        Self::new(move |err| {
            let inner = self.clone();
            async move {
                let mut response = inner.call(err).await;
                *response.status_mut() = status;
                response
            }
        })
    }
}

impl fmt::Debug for ErrorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorHandler(..)")
    }
}

/// The callable a handler file exports.
#[derive(Debug, Clone)]
pub enum Handler {
    Endpoint(Endpoint),
    Middleware(Middleware),
    ErrorHandler(ErrorHandler),
}

/// Shape tag of a [`Handler`], used to check exports against file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerShape {
    Endpoint,
    Middleware,
    ErrorHandler,
}

impl fmt::Display for HandlerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerShape::Endpoint => f.write_str("endpoint"),
            HandlerShape::Middleware => f.write_str("middleware"),
            HandlerShape::ErrorHandler => f.write_str("error handler"),
        }
    }
}

impl Handler {
    pub fn shape(&self) -> HandlerShape {
        match self {
            Handler::Endpoint(_) => HandlerShape::Endpoint,
            Handler::Middleware(_) => HandlerShape::Middleware,
            Handler::ErrorHandler(_) => HandlerShape::ErrorHandler,
        }
    }

    /// Shorthand for [`Endpoint::new`].
    pub fn endpoint<F, Fut>(f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Handler::Endpoint(Endpoint::new(f))
    }

    /// Shorthand for [`Middleware::new`].
    pub fn middleware<F, Fut>(f: F) -> Self
    where
        F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Handler::Middleware(Middleware::new(f))
    }

    /// Shorthand for [`ErrorHandler::new`].
    pub fn error_handler<F, Fut>(f: F) -> Self
    where
        F: Fn(Arc<HandlerError>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Handler::ErrorHandler(ErrorHandler::new(f))
    }

    /// Unwrap an endpoint, reporting the actual shape otherwise.
    pub fn into_endpoint(self) -> Result<Endpoint, HandlerShape> {
        match self {
            Handler::Endpoint(endpoint) => Ok(endpoint),
            other => Err(other.shape()),
        }
    }

    pub fn into_middleware(self) -> Result<Middleware, HandlerShape> {
        match self {
            Handler::Middleware(middleware) => Ok(middleware),
            other => Err(other.shape()),
        }
    }

    pub fn into_error_handler(self) -> Result<ErrorHandler, HandlerShape> {
        match self {
            Handler::ErrorHandler(handler) => Ok(handler),
            other => Err(other.shape()),
        }
    }
}

impl From<Endpoint> for Handler {
    fn from(endpoint: Endpoint) -> Self {
        Handler::Endpoint(endpoint)
    }
}

impl From<Middleware> for Handler {
    fn from(middleware: Middleware) -> Self {
        Handler::Middleware(middleware)
    }
}

impl From<ErrorHandler> for Handler {
    fn from(handler: ErrorHandler) -> Self {
        Handler::ErrorHandler(handler)
    }
}
