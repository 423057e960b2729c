//! Analyzer endpoint configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use url::Url;

use codecritic_core::{Error, Result};

/// Configuration for the analyze endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Request timeout in milliseconds. `None` waits until the transport
    /// gives up; zero is rejected by [`ApiConfig::validate`].
    pub timeout_ms: Option<u64>,
}

impl ApiConfig {
    /// Analyzer running on the developer's machine
    pub const LOCAL_URL: &'static str = "http://127.0.0.1:8000";
    /// Hosted analyzer
    pub const HOSTED_URL: &'static str = "https://project3-xfk2.onrender.com";

    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("CODECRITIC_API_URL")
            .or_else(|| lookup("API_URL"))
            .unwrap_or_else(|| Self::LOCAL_URL.to_string());

        let timeout_ms = match lookup("CODECRITIC_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(secs.saturating_mul(1000)),
                _ => {
                    return Err(Error::Configuration(format!(
                        "CODECRITIC_TIMEOUT_SECS must be a positive whole number of seconds, got '{}'",
                        raw
                    )));
                }
            },
            None => None,
        };

        let config = Self {
            base_url,
            timeout_ms,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create configuration with an explicit base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: None,
        }
    }

    pub fn local() -> Self {
        Self::new(Self::LOCAL_URL)
    }

    pub fn hosted() -> Self {
        Self::new(Self::HOSTED_URL)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout. Non-zero durations below a millisecond round
    /// up to one millisecond.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.timeout_ms = Some(if millis == 0 && !timeout.is_zero() { 1 } else { millis });
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Check that the base URL is an absolute http(s) URL and that any
    /// timeout is non-zero
    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == Some(0) {
            return Err(Error::Configuration(
                "request timeout must be greater than zero".to_string(),
            ));
        }

        let url = Url::parse(&self.base_url).map_err(|e| {
            Error::Configuration(format!("invalid analyzer URL '{}': {}", self.base_url, e))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(Error::Configuration(format!(
                "analyzer URL must use http or https, got '{}'",
                other
            ))),
        }
    }

    /// Full URL of the analyze route
    pub fn endpoint(&self) -> String {
        format!("{}/analyze", self.base_url.trim_end_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::local()
    }
}
