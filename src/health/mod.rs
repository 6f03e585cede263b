//! Kubernetes-style health-check middleware.
//!
//! Kubernetes asks two questions. [`HealthCheck`] answers them.
//!
//! | Probe | Default path | Question |
//! |---|---|---|
//! | **Liveness** | `/health/liveness` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/health/readiness` | Can the pod serve traffic? Failure → pulled from load-balancer. |
//!
//! The middleware answers both paths itself, so they need no routes:
//!
//! ```rust
//! use tsu_health::{Request, Response, Router, health::{HealthCheck, HealthConfig}};
//!
//! # async fn list_users(_: Request) -> Response { Response::text("") }
//! # fn pool_is_up() -> bool { true }
//! let app = Router::new()
//!     .middleware(HealthCheck::with_config(
//!         HealthConfig::default().with_readiness_probe(|_: &Request| pool_is_up()),
//!     ))
//!     .get("/users", list_users);
//! ```
//!
//! | Probe result | Status | Body |
//! |---|---|---|
//! | absent (`None`) | `200` | `{"status":"ok"}` |
//! | `true` | `200` | `{"status":"ok"}` |
//! | `false` | `503` | `{"status":"unavailable"}` |
//!
//! Every other path is handed to the rest of the chain untouched.

mod config;
mod probe;

pub use config::{DEFAULT_LIVENESS_ENDPOINT, DEFAULT_READINESS_ENDPOINT, HealthConfig, ProbeKind};
pub use probe::{BoxedProbe, Probe, always_healthy};

use http::StatusCode;
use serde::Serialize;
use tracing::{debug, warn};

use crate::handler::BoxFuture;
use crate::middleware::{Middleware, Next};
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};

/// The `status` value of a health response.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Unavailable,
}

impl HealthStatus {
    pub fn from_healthy(healthy: bool) -> Self {
        if healthy { Self::Ok } else { Self::Unavailable }
    }

    pub fn status_code(self) -> StatusCode {
        match self {
            Self::Ok => StatusCode::OK,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Serialize)]
struct Report {
    status: HealthStatus,
}

impl IntoResponse for HealthStatus {
    fn into_response(self) -> Response {
        (self.status_code(), Json(Report { status: self })).into_response()
    }
}

/// Liveness / readiness interceptor.
///
/// Register it with [`Router::middleware`](crate::Router::middleware). The
/// configuration is fixed at construction and shared read-only by every
/// request.
#[derive(Clone, Debug, Default)]
pub struct HealthCheck {
    config: HealthConfig,
}

impl HealthCheck {
    /// Default endpoints, both probes always healthy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `config` as given. Nothing is filled in from the defaults.
    pub fn with_config(config: HealthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    /// Answers `req` if its path is one of the two endpoints.
    pub fn evaluate(&self, req: &Request) -> Option<HealthStatus> {
        let (kind, probe) = self.config.resolve(req.path())?;
        let healthy = probe.is_none_or(|p| p.check(req));
        let status = HealthStatus::from_healthy(healthy);

        if healthy {
            debug!(probe = %kind, path = req.path(), "health probe ok");
        } else {
            warn!(probe = %kind, path = req.path(), "health probe reported unavailable");
        }
        Some(status)
    }
}

impl Middleware for HealthCheck {
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        match self.evaluate(&req) {
            Some(status) => Box::pin(async move { status.into_response() }),
            None => Box::pin(next.run(req)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use bytes::Bytes;
    use http::Method;

    use super::*;

    fn request(method: Method, path: &str) -> Request {
        http::Request::builder()
            .method(method)
            .uri(path)
            .body(Bytes::new())
            .unwrap()
            .into()
    }

    #[test]
    fn status_maps_to_code_and_body() {
        let ok = HealthStatus::Ok.into_response();
        assert_eq!(ok.status_code(), StatusCode::OK);
        assert_eq!(ok.header("content-type"), Some("application/json"));
        assert_eq!(ok.body(), br#"{"status":"ok"}"#);

        let down = HealthStatus::Unavailable.into_response();
        assert_eq!(down.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(down.body(), br#"{"status":"unavailable"}"#);
    }

    #[test]
    fn with_config_is_used_verbatim() {
        let check = HealthCheck::with_config(HealthConfig {
            liveness_probe: None,
            liveness_endpoint: "/live".to_owned(),
            readiness_probe: None,
            readiness_endpoint: "/ready".to_owned(),
        });
        assert_eq!(check.config().liveness_endpoint, "/live");
        assert!(check.config().liveness_probe.is_none());
        assert_eq!(check.evaluate(&request(Method::GET, DEFAULT_LIVENESS_ENDPOINT)), None);

        assert_eq!(HealthCheck::new().config().readiness_endpoint, DEFAULT_READINESS_ENDPOINT);
    }

    #[test]
    fn evaluate_ignores_other_paths() {
        let check = HealthCheck::new();
        assert_eq!(check.evaluate(&request(Method::GET, "/api/test")), None);
        assert_eq!(check.evaluate(&request(Method::GET, "/health/liveness")), Some(HealthStatus::Ok));
    }

    #[test]
    fn absent_probe_is_healthy() {
        let check = HealthCheck::with_config(
            HealthConfig::default().without_liveness_probe().without_readiness_probe(),
        );
        assert_eq!(check.evaluate(&request(Method::GET, "/health/liveness")), Some(HealthStatus::Ok));
        assert_eq!(check.evaluate(&request(Method::GET, "/health/readiness")), Some(HealthStatus::Ok));
    }

    #[test]
    fn any_method_is_answered() {
        let check = HealthCheck::with_config(
            HealthConfig::default().with_readiness_probe(|_: &Request| false),
        );
        for method in [Method::GET, Method::HEAD, Method::POST] {
            assert_eq!(
                check.evaluate(&request(method, "/health/readiness")),
                Some(HealthStatus::Unavailable)
            );
        }
    }

    #[test]
    fn probe_sees_the_request_and_runs_once_per_evaluation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let check = HealthCheck::with_config(HealthConfig::default().with_liveness_probe(
            move |req: &Request| {
                counter.fetch_add(1, Ordering::SeqCst);
                req.header("x-probe") == Some("pass")
            },
        ));

        let mut req = request(Method::GET, "/health/liveness");
        assert_eq!(check.evaluate(&req), Some(HealthStatus::Unavailable));
        req.headers.insert("x-probe", "pass".parse().unwrap());
        assert_eq!(check.evaluate(&req), Some(HealthStatus::Ok));
        assert_eq!(check.evaluate(&request(Method::GET, "/health/readiness")), Some(HealthStatus::Ok));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
