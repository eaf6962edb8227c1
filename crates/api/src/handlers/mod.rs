//! Request handlers, grouped by resource.

use axum::http::{Method, Uri};

use crate::error::AppError;

pub mod categories;
pub mod dashboard;
pub mod profile;
pub mod tasks;

/// Fallback for paths with no route.
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}

/// Fallback for known paths requested with an unsupported method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}
