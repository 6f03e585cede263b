//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, Method, Uri};

/// An incoming HTTP request with its body fully buffered.
///
/// Built by the server from a hyper request, or in-process from an
/// [`http::Request<Bytes>`] (handy in tests):
///
/// ```rust
/// use bytes::Bytes;
/// use tsu_health::Request;
///
/// let req: Request = http::Request::get("/health/liveness")
///     .body(Bytes::new())
///     .unwrap()
///     .into();
/// assert_eq!(req.path(), "/health/liveness");
/// ```
#[derive(Debug)]
pub struct Request {
    pub(crate) method: Method,
    pub(crate) uri: Uri,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    pub fn method(&self) -> &Method { &self.method }
    pub fn uri(&self) -> &Uri { &self.uri }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// The URI path, without the query string.
    pub fn path(&self) -> &str { self.uri.path() }

    /// Case-insensitive header lookup. Values that are not visible ASCII
    /// are reported as missing.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

impl From<http::Request<Bytes>> for Request {
    fn from(req: http::Request<Bytes>) -> Self {
        let (parts, body) = req.into_parts();
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            params: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_excludes_query_string() {
        let req: Request = http::Request::get("/health/readiness?verbose=1")
            .body(Bytes::new())
            .unwrap()
            .into();
        assert_eq!(req.path(), "/health/readiness");
        assert_eq!(req.uri().query(), Some("verbose=1"));
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req: Request = http::Request::post("/users")
            .header("Content-Type", "application/json")
            .body(Bytes::from_static(b"{}"))
            .unwrap()
            .into();
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("x-missing"), None);
        assert_eq!(req.body(), b"{}");
    }
}
