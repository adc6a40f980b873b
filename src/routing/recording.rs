//! Route sink that records registrations instead of serving them.

use std::fmt;

use serde::Serialize;

use crate::http::handler::{Endpoint, ErrorHandler};
use crate::routing::{ChainLink, RouteSink};
use crate::structure::HttpMethod;

/// One recorded registration. Middleware are listed by display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Registration {
    Route {
        method: HttpMethod,
        path: String,
        middleware: Vec<String>,
    },
    PathMiddleware {
        path: String,
        middleware: Vec<String>,
    },
    NotFound,
    ErrorHandler,
}

impl Registration {
    pub fn route(method: HttpMethod, path: &str, middleware: &[&str]) -> Self {
        Registration::Route {
            method,
            path: path.to_string(),
            middleware: middleware.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn path_middleware(path: &str, middleware: &[&str]) -> Self {
        Registration::PathMiddleware {
            path: path.to_string(),
            middleware: middleware.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Registration::Route {
                method,
                path,
                middleware,
            } => {
                write!(f, "{:<7} {}", method.to_string(), path)?;
                if !middleware.is_empty() {
                    write!(f, "  [{}]", middleware.join(", "))?;
                }
                Ok(())
            }
            Registration::PathMiddleware { path, middleware } => {
                write!(f, "{:<7} {}  [{}]", "USE", path, middleware.join(", "))
            }
            Registration::NotFound => f.write_str("404     (not-found handler)"),
            Registration::ErrorHandler => f.write_str("ERROR   (error handler)"),
        }
    }
}

/// Ordered log of everything the mounter registered.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    registrations: Vec<Registration>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn into_registrations(self) -> Vec<Registration> {
        self.registrations
    }

    /// Routes registered for `path`, by method.
    pub fn methods_at(&self, path: &str) -> Vec<HttpMethod> {
        self.registrations
            .iter()
            .filter_map(|registration| match registration {
                Registration::Route {
                    method,
                    path: route_path,
                    ..
                } if route_path == path => Some(*method),
                _ => None,
            })
            .collect()
    }
}

fn names(chain: &[ChainLink<'_>]) -> Vec<String> {
    chain.iter().map(|link| link.name.to_string()).collect()
}

impl RouteSink for RecordingSink {
    fn register_route(
        &mut self,
        method: HttpMethod,
        path: &str,
        chain: &[ChainLink<'_>],
        _handler: &Endpoint,
    ) {
        self.registrations.push(Registration::Route {
            method,
            path: path.to_string(),
            middleware: names(chain),
        });
    }

    fn register_path_middleware(&mut self, path: &str, chain: &[ChainLink<'_>]) {
        self.registrations.push(Registration::PathMiddleware {
            path: path.to_string(),
            middleware: names(chain),
        });
    }

    fn register_not_found(&mut self, _handler: &Endpoint) {
        self.registrations.push(Registration::NotFound);
    }

    fn register_error_handler(&mut self, _handler: &ErrorHandler) {
        self.registrations.push(Registration::ErrorHandler);
    }
}
