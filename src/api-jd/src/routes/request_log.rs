use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{error, info, warn};

/// Logs every request once it completes, leveled by the response class:
/// client errors warn, server errors error, everything else info.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    match status {
        400..=499 => warn!(method = %method, path = %path, status, elapsed_ms),
        500..=599 => error!(method = %method, path = %path, status, elapsed_ms),
        _ => info!(method = %method, path = %path, status, elapsed_ms),
    }

    response
}
