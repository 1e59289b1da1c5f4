//! Client configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest};
use reqwest::Url;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for reaching the franchise backend and acting on it.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FRANCHISE")]
pub struct ClientSettings {
    /// Root URL of the franchise backend.
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// User-agent override.
    pub user_agent: Option<String>,
    /// Act as this end user.
    pub user_id: Option<i64>,
    /// Act as this brand manager.
    pub manager_id: Option<i64>,
    /// Default listing page size.
    pub page_size: Option<u32>,
    /// Emit logs as JSON lines.
    #[ortho_config(default = false)]
    pub log_json: bool,
}

impl ClientSettings {
    /// The configured backend URL, falling back to the local default.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the configured URL is malformed.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1))
    }

    /// First-page request with the configured size, clamped to the backend limit.
    pub fn first_page(&self) -> PageRequest {
        PageRequest::first(self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE))
    }
}
