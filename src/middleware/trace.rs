use std::time::Instant;

use tracing::{Instrument, info, info_span};

use crate::middleware::Next;
use crate::request::Request;
use crate::response::Response;

/// Per-request span with method and path, closed by one `info!` event
/// carrying the status and latency.
///
/// Register it first so the latency covers every other middleware:
///
/// ```rust
/// use tsu_health::{Router, health::HealthCheck, middleware};
///
/// let app = Router::new()
///     .middleware(middleware::trace)
///     .middleware(HealthCheck::new());
/// ```
pub async fn trace(req: Request, next: Next) -> Response {
    let span = info_span!("request", method = %req.method(), path = %req.path());
    let started = Instant::now();

    async move {
        let res = next.run(req).await;
        info!(
            status = res.status_code().as_u16(),
            latency_us = started.elapsed().as_micros() as u64,
            "request completed"
        );
        res
    }
    .instrument(span)
    .await
}
