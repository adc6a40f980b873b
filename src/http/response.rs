//! Failed-request responses.
//!
//! # Responsibilities
//! - Define the error type endpoints and middleware return
//! - Carry the error inside the 500 response so the error boundary can hand
//!   it to the mounted `error` handler
//! - Turn handler panics into the same kind of failed response
//!
//! # Design Decisions
//! - The failure travels as a response extension; no side channel
//! - Without an error handler the plain 500 response is sent as-is

use std::any::Any;
use std::error::Error as StdError;
use std::sync::Arc;

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Error returned by a failing endpoint or middleware.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error, keeping it as the source.
    pub fn from_source<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Response extension marking a failed request.
#[derive(Debug, Clone)]
pub struct HandlerFailure(pub Arc<HandlerError>);

impl HandlerFailure {
    pub fn error(&self) -> &HandlerError {
        &self.0
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
        response
            .extensions_mut()
            .insert(HandlerFailure(Arc::new(self)));
        response
    }
}

/// Convert a caught panic payload into a failed response.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    HandlerError::new(format!("handler panicked: {}", detail)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_carries_failure() {
        let response = HandlerError::new("db unavailable").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let failure = response.extensions().get::<HandlerFailure>().unwrap();
        assert_eq!(failure.error().message(), "db unavailable");
    }

    #[test]
    fn test_from_source_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err = HandlerError::from_source(io);
        assert_eq!(err.message(), "disk gone");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_panic_response() {
        let response = panic_response(Box::new("oops"));
        let failure = response.extensions().get::<HandlerFailure>().unwrap();
        assert_eq!(failure.error().message(), "handler panicked: oops");
    }
}
