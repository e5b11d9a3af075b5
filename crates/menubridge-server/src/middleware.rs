use std::time::Instant;

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

use crate::error::ErrorReport;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Logs every completed request, and every failure once with its mapped
/// status, code, message and details.
///
/// Failures are recognised by the [`ErrorReport`] extension that
/// `ApiError` attaches to its response.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();

    let res = next.run(req).await;
    let status = res.status().as_u16();

    if let Some(report) = res.extensions().get::<ErrorReport>() {
        tracing::error!(
            method = %method,
            path = %path,
            request_id = %request_id,
            status,
            code = %report.body.code,
            message = %report.body.message,
            details = ?report.body.details,
            source = report.source.as_deref(),
            "request failed"
        );
    }

    tracing::info!(
        method = %method,
        path = %path,
        request_id = %request_id,
        status,
        duration_ms = u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX),
        "HTTP request completed"
    );

    res
}
