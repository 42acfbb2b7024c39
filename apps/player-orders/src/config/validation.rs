//! Validation fan-out configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::order_validation::ValidationSource;

/// One upstream validation source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Endpoint the draft is POSTed to.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Timeout override in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// Validation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Default per-source timeout in milliseconds.
    #[serde(default = "default_source_timeout_ms")]
    pub source_timeout_ms: u64,
    /// Sources without an endpoint accept every draft instead of being
    /// reported unavailable. Development only.
    #[serde(default)]
    pub allow_static_sources: bool,
    /// Per-source settings.
    #[serde(default)]
    pub sources: BTreeMap<ValidationSource, SourceConfig>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            source_timeout_ms: default_source_timeout_ms(),
            allow_static_sources: false,
            sources: BTreeMap::new(),
        }
    }
}

impl ValidationConfig {
    /// Default per-source timeout.
    #[must_use]
    pub const fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.source_timeout_ms)
    }

    /// Timeout override for `source`, if configured.
    #[must_use]
    pub fn timeout_for(&self, source: ValidationSource) -> Option<Duration> {
        self.sources
            .get(&source)
            .and_then(|s| s.timeout_ms)
            .map(Duration::from_millis)
    }

    /// Endpoint for `source`, if configured.
    #[must_use]
    pub fn endpoint_for(&self, source: ValidationSource) -> Option<&str> {
        self.sources
            .get(&source)
            .and_then(|s| s.endpoint.as_deref())
    }
}

const fn default_source_timeout_ms() -> u64 {
    3000
}
