//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tower::ServiceExt;

use file_router::http::{Handler, HandlerError, HandlerResult};

/// Request header each `trace` middleware appends its name to.
pub const TRACE: &str = "x-trace";

/// Middleware appending `name` to the trace header, then continuing.
pub fn trace(name: &'static str) -> Handler {
    Handler::middleware(move |mut req, next| async move {
        let trail = match req.headers().get(TRACE).and_then(|v| v.to_str().ok()) {
            Some(existing) => format!("{},{}", existing, name),
            None => name.to_string(),
        };
        req.headers_mut()
            .insert(TRACE, HeaderValue::from_str(&trail).unwrap());
        Ok(next.run(req).await)
    })
}

/// Middleware answering 401 without calling the rest of the chain.
pub fn deny() -> Handler {
    Handler::middleware(|_req, _next| async { Ok(StatusCode::UNAUTHORIZED.into_response()) })
}

/// Endpoint answering `"<label> <path> [<trace>]"`.
pub fn echo(label: &'static str) -> Handler {
    Handler::endpoint(move |req: Request| async move {
        let trail = req
            .headers()
            .get(TRACE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        Ok(format!("{} {} [{}]", label, req.uri().path(), trail).into_response())
    })
}

/// Endpoint failing with `message`.
pub fn failing(message: &'static str) -> Handler {
    Handler::endpoint(move |_req| async move { Err::<Response, _>(HandlerError::new(message)) })
}

async fn explode(_req: Request) -> HandlerResult {
    panic!("endpoint exploded")
}

/// Endpoint that panics.
pub fn panicking() -> Handler {
    Handler::endpoint(explode)
}

/// Error handler answering 200 `"handled: <error>"`; the router forces 500.
pub fn error_page() -> Handler {
    Handler::error_handler(|err| async move { format!("handled: {}", err).into_response() })
}

pub async fn send(router: &Router, method: &str, uri: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
