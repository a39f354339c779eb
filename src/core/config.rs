//! Routing engine configuration
//!
//! The engine is optional. Callers hold an `Option<EngineConfig>`; `None`
//! means routing is disabled and every path stays a straight line.

use std::time::Duration;

/// Maximum number of input waypoints sent in one engine request
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Per-request timeout applied to engine calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the engine base address
pub const BASE_URL_ENV: &str = "OSRM_BASE_URL";

/// Environment variable overriding the request timeout, in seconds
pub const TIMEOUT_ENV: &str = "OSRM_TIMEOUT_SECS";

/// Location and limits of the routing engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Base address, e.g. `http://localhost:5000` (no trailing slash)
    pub base_url: String,

    /// Timeout for each chunk request
    pub timeout: Duration,
}

impl EngineConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the engine configuration from the process environment
    ///
    /// Returns `None` when `OSRM_BASE_URL` is unset or blank.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty())?;
        let mut config = Self::new(base_url);

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => log::warn!("Ignoring invalid {TIMEOUT_ENV}={raw:?}"),
            }
        }

        Some(config)
    }
}
