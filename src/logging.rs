use axum::{
    extract::Request,
    http::{header, Method, Uri},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use std::time::Instant;
use tracing::info;

/// One access-log line per request on the `access_log` target
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user_agent = header_value(&request, header::USER_AGENT.as_str());
    let remote_addr = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|forwarded| forwarded.split(',').next())
        .map(|addr| addr.trim().to_string())
        .unwrap_or_else(|| header_value(&request, "x-real-ip"));

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();
    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    let content_length = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");

    info!(
        target: "access_log",
        "{} {} \"{}\" {} {} {}ms \"{}\"",
        timestamp,
        remote_addr,
        format_request(&method, &uri),
        status.as_u16(),
        content_length,
        duration.as_millis(),
        user_agent,
    );

    response
}

fn header_value(request: &Request, name: &str) -> String {
    request
        .headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-")
        .to_string()
}

// Query strings are dropped so submitted values never reach the log
fn format_request(method: &Method, uri: &Uri) -> String {
    format!("{} {}", method, uri.path())
}
