//! Request logging middleware.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use nanoid::nanoid;
use std::time::Instant;
use tracing::info;

use crate::colors::colored_id;

/// Assigns every request a short colored ID and logs both edges of the
/// exchange.
///
/// The ID is stored in the request extensions so handlers can tag their own
/// log lines with it. The closing line carries the final status, which means
/// error responses get logged the same way successes do.
pub async fn log_requests(mut req: Request<Body>, next: Next) -> Response {
    let id = nanoid!(5);
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let start = Instant::now();

    req.extensions_mut().insert(id.clone());

    info!("{} → {} {}", colored_id(&id), method, path);
    let response = next.run(req).await;
    info!(
        "{} ← {} {} ({}ms)",
        colored_id(&id),
        method,
        response.status(),
        start.elapsed().as_millis()
    );
    response
}
