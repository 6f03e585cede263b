//! Route handlers and the boxed future both handlers and middleware return.
//!
//! A route handler is the last link of the request chain: once every
//! [`Middleware`](crate::middleware::Middleware) has called
//! [`Next::run`](crate::middleware::Next::run), the router looks up the
//! matching [`Handler`] and calls it. Both traits have the same shape, a
//! `call` returning [`BoxFuture`], and share [`into_box_future`] to get there
//! from whatever the user's async fn produced.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// `Send + 'static` lets tokio move it across worker threads.
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// The route table stores handlers of different concrete types side by side.
pub(crate) type BoxedHandler = Arc<dyn Handler>;

/// Boxes any future whose output converts into a response.
pub(crate) fn into_box_future<Fut, R>(fut: Fut) -> BoxFuture
where
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    Box::pin(async move { fut.await.into_response() })
}

/// Answers a request that matched a route.
///
/// Implemented for every `async fn(Request) -> impl IntoResponse`, which is
/// what you normally register. Implement it by hand for handlers that carry
/// state.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: Request) -> BoxFuture;
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        into_box_future(self(req))
    }
}
