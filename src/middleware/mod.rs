//! Middleware layer.
//!
//! Middleware intercepts requests before they reach the route table and sees
//! every response on the way out. It is the right place for cross-cutting
//! concerns: health probes, tracing, request-id injection, authentication.
//!
//! A middleware is anything implementing [`Middleware`]. Plain async
//! functions and closures qualify automatically:
//!
//! ```rust
//! use tsu_health::{Request, Response, Router};
//! use tsu_health::middleware::Next;
//!
//! async fn stamp(req: Request, next: Next) -> Response {
//!     let mut res = next.run(req).await;
//!     res.headers_mut().insert("x-served-by", "tsu".parse().unwrap());
//!     res
//! }
//!
//! let app = Router::new().middleware(stamp);
//! ```
//!
//! Built-in middleware:
//! - [`trace`] — one event per request with method, path, status, latency
//! - [`HealthCheck`](crate::health::HealthCheck) — liveness / readiness probes

use std::future::Future;
use std::sync::Arc;

use crate::handler::{BoxFuture, into_box_future};
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::Router;

mod trace;

pub use trace::trace;

/// A link in the request-processing chain.
///
/// Either answer the request itself (short-circuit) or hand it on with
/// [`Next::run`].
pub trait Middleware: Send + Sync + 'static {
    fn call(&self, req: Request, next: Next) -> BoxFuture;
}

pub(crate) type BoxedMiddleware = Arc<dyn Middleware>;

impl<F, Fut, R> Middleware for F
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        into_box_future(self(req, next))
    }
}

/// The remainder of the chain after the current middleware.
pub struct Next {
    router: Arc<Router>,
    index: usize,
}

impl Next {
    pub(crate) fn new(router: Arc<Router>) -> Self {
        Self { router, index: 0 }
    }

    /// Pass `req` to the next middleware, or to the route table once the
    /// stack is exhausted.
    pub async fn run(self, req: Request) -> Response {
        let current = self.router.stack.get(self.index).cloned();
        match current {
            Some(middleware) => {
                let next = Self { router: self.router, index: self.index + 1 };
                middleware.call(req, next).await
            }
            None => self.router.endpoint(req).await,
        }
    }
}
