//! File-level client settings.
//!
//! # Example
//!
//! ```ignore
//! use anilist::{AniClient, ClientConfig};
//!
//! let config = ClientConfig::from_toml_str(r#"
//! timeout_secs = 15
//! requests_per_minute = 60
//! default_per_page = 25
//! "#)?;
//! let client = AniClient::connect(config).await?;
//! ```

use std::path::Path;
use std::time::Duration;

use anilist_core::{DEFAULT_PER_PAGE, Pagination};
use anilist_net::{DEFAULT_ENDPOINT, Error, Result, TransportConfig};
use serde::{Deserialize, Serialize};

/// Settings for an [`AniClient`](crate::AniClient).
///
/// Every key is optional in TOML; missing keys take the defaults below.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// GraphQL endpoint.
    pub endpoint: String,
    /// Request timeout in seconds; `0` disables it.
    pub timeout_secs: u64,
    /// Connect timeout in seconds; `0` disables it.
    pub connect_timeout_secs: u64,
    /// Overrides the default `anilist-rs/<version>` user agent.
    pub user_agent: Option<String>,
    /// Client-side throttle.
    pub requests_per_minute: Option<u32>,
    /// Page size used when a search is given no pagination.
    pub default_per_page: u32,
    /// Bearer token to authenticate with on connect.
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: None,
            requests_per_minute: None,
            default_per_page: DEFAULT_PER_PAGE,
            token: None,
        }
    }
}

impl ClientConfig {
    /// Parse settings from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::Config(format!("invalid client config: {e}")))
    }

    /// Read settings from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// The transport part of these settings.
    pub fn transport(&self) -> TransportConfig {
        let defaults = TransportConfig::default();
        TransportConfig {
            endpoint: self.endpoint.clone(),
            timeout: seconds(self.timeout_secs),
            connect_timeout: seconds(self.connect_timeout_secs),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            requests_per_minute: self.requests_per_minute,
        }
    }

    /// First-page pagination with the configured page size.
    pub fn default_pagination(&self) -> Pagination {
        Pagination::first(self.default_per_page)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("requests_per_minute", &self.requests_per_minute)
            .field("default_per_page", &self.default_per_page)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn seconds(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
