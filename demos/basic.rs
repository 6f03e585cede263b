//! Health-check middleware in front of a couple of JSON routes.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl -i http://localhost:3000/health/live
//!   curl -i http://localhost:3000/health/ready      # 503 until warm-up ends
//!   curl -X POST http://localhost:3000/maintenance  # flips readiness off
//!   curl http://localhost:3000/users/42

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use http::StatusCode;
use serde::Serialize;
use tsu_health::health::{HealthCheck, HealthConfig};
use tsu_health::{Json, Request, Router, Server, middleware};

static READY: AtomicBool = AtomicBool::new(false);

#[derive(Serialize)]
struct User {
    id: String,
    name: &'static str,
}

#[tokio::main]
async fn main() -> Result<(), tsu_health::Error> {
    tracing_subscriber::fmt::init();

    let health = HealthConfig::default()
        .with_liveness_endpoint("/health/live")
        .with_readiness_endpoint("/health/ready")
        .with_readiness_probe(|_: &Request| READY.load(Ordering::Acquire));

    let app = Router::new()
        .middleware(middleware::trace)
        .middleware(HealthCheck::with_config(health))
        .get("/users/{id}", get_user)
        .post("/maintenance", enter_maintenance);

    // Simulated warm-up: report ready after five seconds.
    tokio::spawn(async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        READY.store(true, Ordering::Release);
    });

    Server::bind("0.0.0.0:3000").await?.serve(app).await
}

// GET /users/{id}
async fn get_user(req: Request) -> Json<User> {
    let id = req.param("id").unwrap_or("unknown").to_owned();
    Json(User { id, name: "alice" })
}

// POST /maintenance → 202, readiness starts failing
async fn enter_maintenance(_req: Request) -> StatusCode {
    READY.store(false, Ordering::Release);
    StatusCode::ACCEPTED
}
