//! Request spans.
//!
//! Every request runs inside a span carrying its request ID, so log lines
//! from hooks and handlers can be correlated.

use axum::body::Body;
use axum::http::Request;
use tracing::Span;

use crate::http::request::RequestIdExt;

/// Span for one HTTP request.
pub fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %request.request_id(),
        method = %request.method(),
        path = %request.uri().path(),
    )
}
