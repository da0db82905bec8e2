//! Analysis backend connection settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Backend origin used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

fn default_base_url() -> String {
    String::from(DEFAULT_BASE_URL)
}

/// Default request timeout. Workbook analysis with GPT matching is slow.
const fn default_timeout_secs() -> u64 {
    120
}

fn default_user_agent() -> String {
    format!("bilancio/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Backend origin, without the `/api/v1/analyze` path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound for one analysis request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Base URL with any trailing slash removed.
    #[must_use]
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Full URL of the analysis endpoint.
    #[must_use]
    pub fn analyze_url(&self) -> String {
        format!("{}/api/v1/analyze", self.origin())
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the base URL is empty or not
    /// http(s), or the timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let origin = self.origin();
        if origin.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: "must not be empty".into(),
            });
        }
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: format!("'{origin}' must start with http:// or https://"),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
