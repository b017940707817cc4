//! Request-id and tracing-span helpers for the router's middleware stack.

use axum::{body::Body, http::HeaderName, http::Request};
use tracing::{info_span, Span};

/// Header carrying the per-request id, set on the way in and echoed on the way out.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Build the span each request is handled in, tagged with its request id.
pub fn make_span(req: &Request<Body>) -> Span {
    let request_id = req
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    info_span!(
        "request",
        method = %req.method(),
        path = %req.uri().path(),
        request_id = %request_id,
    )
}
