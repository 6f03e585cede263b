//! Radix-tree request router with a middleware stack in front of it.
//!
//! One tree per HTTP method. O(path-length) lookup. Middleware runs before
//! the lookup, so it can answer paths that have no route at all.

use std::collections::HashMap;
use std::sync::Arc;

use http::{Method, StatusCode};
use matchit::Router as MatchitRouter;

use crate::handler::{BoxFuture, BoxedHandler, Handler};
use crate::middleware::{BoxedMiddleware, Middleware, Next};
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Build it once at startup and pass it to
/// [`Server::serve`](crate::Server::serve). Every builder method returns
/// `self` so registrations chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    pub(crate) stack: Vec<BoxedMiddleware>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), stack: Vec::new() }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax and `req.param("name")` retrieves
    /// them:
    ///
    /// ```rust,no_run
    /// # use http::Method;
    /// # use tsu_health::{Request, Response, Router};
    /// # async fn get_user(_: Request) -> Response { Response::text("") }
    /// # async fn create_user(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::GET,  "/users/{id}", get_user)
    ///     .on(Method::POST, "/users",      create_user);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        let handler: BoxedHandler = Arc::new(handler);
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler)
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::POST, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::PUT, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::DELETE, path, handler)
    }

    /// Append a middleware to the stack.
    ///
    /// Middleware runs in registration order: the first one registered sees
    /// the request first and the response last.
    pub fn middleware(mut self, middleware: impl Middleware) -> Self {
        self.stack.push(Arc::new(middleware));
        self
    }

    /// Run `req` through the middleware stack and the route table.
    ///
    /// This is what the server calls per request. It is also the way to
    /// exercise an application in-process without opening a socket.
    pub async fn handle(self: &Arc<Self>, req: Request) -> Response {
        Next::new(Arc::clone(self)).run(req).await
    }

    /// The innermost link of the chain: route lookup and handler call.
    pub(crate) fn endpoint(&self, mut req: Request) -> BoxFuture {
        let Some(tree) = self.routes.get(&req.method) else {
            return not_found();
        };
        let (handler, params) = {
            let Ok(matched) = tree.at(req.uri.path()) else {
                return not_found();
            };
            let params = matched
                .params
                .iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect::<HashMap<_, _>>();
            (Arc::clone(matched.value), params)
        };
        req.params = params;
        handler.call(req)
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

fn not_found() -> BoxFuture {
    Box::pin(async { Response::status(StatusCode::NOT_FOUND) })
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::response::IntoResponse;

    fn request(method: Method, path: &str) -> Request {
        http::Request::builder()
            .method(method)
            .uri(path)
            .body(Bytes::new())
            .unwrap()
            .into()
    }

    async fn echo_id(req: Request) -> String {
        req.param("id").unwrap_or("none").to_owned()
    }

    #[tokio::test]
    async fn routes_by_method_and_extracts_params() {
        let app = Arc::new(Router::new().get("/users/{id}", echo_id));

        let res = app.handle(request(Method::GET, "/users/42")).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"42");

        let res = app.handle(request(Method::POST, "/users/42")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let app = Arc::new(Router::new().get("/users/{id}", echo_id));
        let res = app.handle(request(Method::GET, "/nope")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert!(res.body().is_empty());
    }

    #[tokio::test]
    async fn middleware_runs_in_registration_order() {
        let app = Arc::new(
            Router::new()
                .middleware(|req: Request, next: Next| async move {
                    let res = next.run(req).await;
                    format!("outer({})", String::from_utf8_lossy(res.body()))
                })
                .middleware(|req: Request, next: Next| async move {
                    let res = next.run(req).await;
                    format!("inner({})", String::from_utf8_lossy(res.body()))
                })
                .get("/", |_req: Request| async { "handler" }),
        );

        let res = app.handle(request(Method::GET, "/")).await;
        assert_eq!(res.body(), b"outer(inner(handler))");
    }

    #[tokio::test]
    async fn middleware_can_short_circuit_unrouted_paths() {
        let app = Arc::new(Router::new().middleware(|req: Request, next: Next| async move {
            if req.path() == "/teapot" {
                return StatusCode::IM_A_TEAPOT.into_response();
            }
            next.run(req).await
        }));

        let res = app.handle(request(Method::GET, "/teapot")).await;
        assert_eq!(res.status_code(), StatusCode::IM_A_TEAPOT);

        let res = app.handle(request(Method::GET, "/other")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }
}
