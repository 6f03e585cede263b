use std::sync::Arc;

use crate::request::Request;

/// A boolean health check, evaluated against the request that asked for it.
///
/// Implemented for every `Fn(&Request) -> bool + Send + Sync + 'static`, so a
/// closure is usually all you need:
///
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use tsu_health::health::HealthConfig;
///
/// let warmed_up = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&warmed_up);
/// let config = HealthConfig::default()
///     .with_readiness_probe(move |_req: &tsu_health::Request| flag.load(Ordering::Acquire));
/// ```
///
/// The check runs synchronously on the request task and its duration is the
/// response's latency. There is no timeout.
pub trait Probe: Send + Sync + 'static {
    fn check(&self, req: &Request) -> bool;
}

impl<F> Probe for F
where
    F: Fn(&Request) -> bool + Send + Sync + 'static,
{
    fn check(&self, req: &Request) -> bool {
        self(req)
    }
}

/// A shared, type-erased [`Probe`].
pub type BoxedProbe = Arc<dyn Probe>;

/// The probe installed by [`HealthConfig::default`](super::HealthConfig).
pub fn always_healthy() -> BoxedProbe {
    Arc::new(|_: &Request| true)
}
