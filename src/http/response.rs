//! Boundary responses.
//!
//! # Responsibilities
//! - Build the fixed responses of the request boundary
//! - Map render results and failures onto status codes
//!
//! # Design Decisions
//! - Error bodies are short plain text, never internal details
//! - Rendered pages are always `text/html`

use std::any::Any;

use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};

/// Body of a 404 for pages.
pub const PAGE_NOT_FOUND: &str = "Page Not Found";

/// Body of a 404 for the API namespace.
pub const API_NOT_FOUND: &str = "API route not found";

/// Body of every 500.
pub const INTERNAL_ERROR: &str = "Internal Server Error";

pub fn document(html: String) -> Response {
    Html(html).into_response()
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, PAGE_NOT_FOUND).into_response()
}

pub fn api_not_found() -> Response {
    (StatusCode::NOT_FOUND, API_NOT_FOUND).into_response()
}

pub fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR).into_response()
}

/// UI pages only answer reads.
pub fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET, HEAD")],
        "Method Not Allowed",
    )
        .into_response()
}

/// Response for a request whose handler panicked.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %message, "Request handler panicked");
    internal_error()
}
