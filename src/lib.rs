//! # tsu-health
//!
//! Liveness and readiness probes for services built on a minimal
//! hyper/tokio HTTP framework.
//!
//! [`health::HealthCheck`] is a middleware. It answers two paths, by default
//! `/health/liveness` and `/health/readiness`, with `{"status":"ok"}` (200) or
//! `{"status":"unavailable"}` (503), depending on a probe you supply. Every
//! other request flows on to your routes untouched.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//!
//! use tsu_health::health::{HealthCheck, HealthConfig};
//! use tsu_health::{Request, Response, Router, Server, middleware};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tsu_health::Error> {
//!     let ready = Arc::new(AtomicBool::new(true));
//!     let probe = Arc::clone(&ready);
//!
//!     let app = Router::new()
//!         .middleware(middleware::trace)
//!         .middleware(HealthCheck::with_config(
//!             HealthConfig::default()
//!                 .with_readiness_probe(move |_: &Request| probe.load(Ordering::Acquire)),
//!         ))
//!         .get("/users/{id}", get_user);
//!
//!     Server::bind("0.0.0.0:3000").await?.serve(app).await
//! }
//!
//! async fn get_user(req: Request) -> Response {
//!     let id = req.param("id").unwrap_or("unknown");
//!     Response::json(format!(r#"{{"id":"{id}"}}"#))
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod health;
pub mod middleware;

pub use error::Error;
pub use handler::{BoxFuture, Handler};
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
