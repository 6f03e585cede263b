use std::fmt;
use std::sync::Arc;

use super::probe::{BoxedProbe, Probe, always_healthy};

pub const DEFAULT_LIVENESS_ENDPOINT: &str = "/health/liveness";
pub const DEFAULT_READINESS_ENDPOINT: &str = "/health/readiness";

/// Which of the two probes a path maps to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProbeKind {
    Liveness,
    Readiness,
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Liveness => "liveness",
            Self::Readiness => "readiness",
        })
    }
}

/// Endpoints and probes for [`HealthCheck`](super::HealthCheck).
///
/// A probe set to `None` is treated as always healthy. Fields are public so a
/// configuration can be written out in full; the `with_*` setters are the
/// shorthand for starting from [`Default`]:
///
/// ```rust
/// use tsu_health::Request;
/// use tsu_health::health::HealthConfig;
///
/// let config = HealthConfig::default()
///     .with_liveness_endpoint("/live")
///     .with_readiness_endpoint("/ready")
///     .with_readiness_probe(|_: &Request| false);
/// ```
#[derive(Clone)]
pub struct HealthConfig {
    pub liveness_probe: Option<BoxedProbe>,
    pub liveness_endpoint: String,
    pub readiness_probe: Option<BoxedProbe>,
    pub readiness_endpoint: String,
}

impl HealthConfig {
    pub fn with_liveness_probe(mut self, probe: impl Probe) -> Self {
        self.liveness_probe = Some(Arc::new(probe));
        self
    }

    pub fn with_readiness_probe(mut self, probe: impl Probe) -> Self {
        self.readiness_probe = Some(Arc::new(probe));
        self
    }

    pub fn without_liveness_probe(mut self) -> Self {
        self.liveness_probe = None;
        self
    }

    pub fn without_readiness_probe(mut self) -> Self {
        self.readiness_probe = None;
        self
    }

    pub fn with_liveness_endpoint(mut self, path: impl Into<String>) -> Self {
        self.liveness_endpoint = path.into();
        self
    }

    pub fn with_readiness_endpoint(mut self, path: impl Into<String>) -> Self {
        self.readiness_endpoint = path.into();
        self
    }

    /// Maps a request path to the probe that answers it. Exact string match;
    /// liveness is checked first. The path is deliberately not normalized or
    /// percent-decoded, so `/health//liveness` or `/health/%6civeness` fall
    /// through to the router.
    pub(crate) fn resolve(&self, path: &str) -> Option<(ProbeKind, Option<&BoxedProbe>)> {
        if path == self.liveness_endpoint {
            Some((ProbeKind::Liveness, self.liveness_probe.as_ref()))
        } else if path == self.readiness_endpoint {
            Some((ProbeKind::Readiness, self.readiness_probe.as_ref()))
        } else {
            None
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            liveness_probe: Some(always_healthy()),
            liveness_endpoint: DEFAULT_LIVENESS_ENDPOINT.to_owned(),
            readiness_probe: Some(always_healthy()),
            readiness_endpoint: DEFAULT_READINESS_ENDPOINT.to_owned(),
        }
    }
}

impl fmt::Debug for HealthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthConfig")
            .field("liveness_probe", &self.liveness_probe.as_ref().map(|_| ".."))
            .field("liveness_endpoint", &self.liveness_endpoint)
            .field("readiness_probe", &self.readiness_probe.as_ref().map(|_| ".."))
            .field("readiness_endpoint", &self.readiness_endpoint)
            .finish()
    }
}
