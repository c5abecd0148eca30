//! HTTP middleware: per-request metrics and trusted-host enforcement.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use ephemd_core::error::ClientCode;

use crate::app_state::AppState;

/// Count and time every request. Labels mirror the scrape dashboards:
/// method, endpoint (raw path), status_code.
pub async fn track_metrics(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let endpoint = req.uri().path().to_string();
    let start = Instant::now();

    let res = next.run(req).await;

    let status = res.status().as_u16().to_string();
    let metrics = state.metrics();
    metrics.http_request_duration.observe(&[], start.elapsed());
    metrics.http_requests.inc(&[
        ("method", method.as_str()),
        ("endpoint", endpoint.as_str()),
        ("status_code", status.as_str()),
    ]);

    res
}

/// Reject requests whose Host header is not in `server.allowed_hosts`.
///
/// `"*"` admits everything (the demo default). `"*.example.com"` admits
/// subdomains, other entries match exactly. A port suffix on the header is
/// ignored.
pub async fn enforce_trusted_host(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let allowed = &state.cfg().server.allowed_hosts;
    if allowed.iter().any(|h| h == "*") {
        return next.run(req).await;
    }

    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(strip_port)
        .unwrap_or("");

    if host_allowed(allowed, host) {
        next.run(req).await
    } else {
        tracing::warn!(%host, "rejected untrusted host header");
        let body = Json(json!({
            "error": ClientCode::BadRequest.as_str(),
            "message": "invalid host header",
        }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((h, p)) if !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()) => h,
        _ => host,
    }
}

fn host_allowed(allowed: &[String], host: &str) -> bool {
    if host.is_empty() {
        return false;
    }
    allowed.iter().any(|rule| match rule.strip_prefix('*') {
        // "*.example.com" -> suffix ".example.com", subdomains only
        Some(suffix) => host.ends_with(suffix),
        None => rule == host,
    })
}
