/// Configuration for the content-generation client
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default address of the content-generation service
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default per-request timeout.
///
/// The service performs a model inference per request, so responses in the
/// single-digit seconds are normal. A hung request past this bound surfaces
/// as a transport error instead of leaving the caller waiting forever.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`ContentClient`](crate::ContentClient)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Base address of the content-generation service
    pub base_url: String,

    /// Timeout applied to every request
    pub request_timeout: Duration,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ContentConfig {
    /// Create a config pointing at a specific service address
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "base_url must start with http:// or https://: {}",
                self.base_url
            ));
        }

        if self.request_timeout.is_zero() {
            return Err("request_timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
