//! Scenario configuration.
//!
//! Read from YAML, then overridden from the environment. Catalog paths are
//! optional; without one the catalog bundled with the crate is used.
//!
//! ```yaml
//! server_url: http://127.0.0.1:4723/wd/hub
//! settings_catalog: locators/settings_xpaths.json
//! request_timeout_secs: 60
//! capabilities:
//!   platformVersion: "11"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::LocatorCatalog;
use crate::result::{ProbeError, ProbeResult};
use crate::session::Capabilities;

/// Environment variable holding the Appium server URL
pub const SERVER_URL_ENV: &str = "JAS_APPIUM_URL";

/// Locator catalog of the main screen shipped with the crate
pub const BUNDLED_MAIN_CATALOG: &str = include_str!("../data/main_xpaths.json");

/// Locator catalog of the settings screen shipped with the crate
pub const BUNDLED_SETTINGS_CATALOG: &str = include_str!("../data/settings_xpaths.json");

/// Settings for one scenario run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Appium server endpoint
    pub server_url: Option<String>,
    /// Desired session capabilities
    pub capabilities: Capabilities,
    /// Locator catalog file of the main screen, bundled one if unset
    pub main_catalog: Option<PathBuf>,
    /// Locator catalog file of the settings screen, bundled one if unset
    pub settings_catalog: Option<PathBuf>,
    /// Per-request timeout of the HTTP driver, in seconds
    pub request_timeout_secs: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            capabilities: Capabilities::default(),
            main_catalog: None,
            settings_catalog: None,
            request_timeout_secs: 60,
        }
    }
}

impl ScenarioConfig {
    /// Create default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ProbeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ProbeError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded scenario config");
        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> ProbeResult<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| ProbeError::config(e.to_string()))
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from `lookup`
    #[must_use]
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(SERVER_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.server_url = Some(url);
        }
        self
    }

    /// Set the server URL
    #[must_use]
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Set the main screen catalog
    #[must_use]
    pub fn with_main_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.main_catalog = Some(path.into());
        self
    }

    /// Set the settings screen catalog
    #[must_use]
    pub fn with_settings_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_catalog = Some(path.into());
        self
    }

    /// Set the capabilities
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Request timeout as a duration
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Load the main screen catalog
    pub fn main_locators(&self) -> ProbeResult<LocatorCatalog> {
        load_catalog(self.main_catalog.as_deref(), BUNDLED_MAIN_CATALOG)
    }

    /// Load the settings screen catalog
    pub fn settings_locators(&self) -> ProbeResult<LocatorCatalog> {
        load_catalog(self.settings_catalog.as_deref(), BUNDLED_SETTINGS_CATALOG)
    }

    /// Server URL, which a real session cannot start without
    pub fn require_server_url(&self) -> ProbeResult<&str> {
        let url = self.server_url.as_deref().ok_or_else(|| {
            ProbeError::config(format!(
                "no Appium server URL configured (set server_url or {SERVER_URL_ENV})"
            ))
        })?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ProbeError::config(format!(
                "server URL must be http(s): {url}"
            )));
        }
        Ok(url.trim_end_matches('/'))
    }
}

fn load_catalog(path: Option<&Path>, bundled: &str) -> ProbeResult<LocatorCatalog> {
    match path {
        Some(path) => LocatorCatalog::load(path),
        None => LocatorCatalog::from_json_str(bundled),
    }
}
