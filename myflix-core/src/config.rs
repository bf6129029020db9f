//! Configuration management
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! {
//!   "api": { "baseUrl": "https://...", "timeoutSecs": 120 }
//! }
//! ```
//! Keys this crate does not know about are preserved on save.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::adapters::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, MYFLIX_API_URL_ENV};

const SETTINGS_FILE: &str = "settings.json";

/// Serializes tests that touch `MYFLIX_API_URL`
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
pub(crate) fn env_guard() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: ApiSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Where the effective base URL came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseUrlSource {
    Default,
    Settings,
    Env,
}

/// Client configuration (resolved view of settings + environment)
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub base_url_source: BaseUrlSource,
    /// Request timeout in seconds; 0 disables the timeout
    pub timeout_secs: u64,
    /// Base URL stored in settings.json, if any
    stored_base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            base_url_source: BaseUrlSource::Default,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            stored_base_url: None,
        }
    }
}

impl Config {
    /// Load config from the data directory
    ///
    /// The base URL can be overridden with `MYFLIX_API_URL` (for testing
    /// against a local server).
    pub fn load(data_dir: &Path) -> Result<Self> {
        let raw = read_settings(data_dir)?;

        let stored_base_url = raw
            .api
            .base_url
            .clone()
            .filter(|url| !url.trim().is_empty());

        let env_url = std::env::var(MYFLIX_API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty());

        let (base_url, base_url_source) = match (env_url, &stored_base_url) {
            (Some(url), _) => (url, BaseUrlSource::Env),
            (None, Some(url)) => (url.clone(), BaseUrlSource::Settings),
            (None, None) => (DEFAULT_BASE_URL.to_string(), BaseUrlSource::Default),
        };

        Ok(Self {
            base_url,
            base_url_source,
            timeout_secs: raw.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT.as_secs()),
            stored_base_url,
        })
    }

    /// Save config to the data directory
    /// Preserves other settings that the client doesn't manage
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(data_dir)?;
        let mut settings = read_settings(data_dir)?;

        settings.api.base_url = self.stored_base_url.clone();
        settings.api.timeout_secs = Some(self.timeout_secs);

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(data_dir.join(SETTINGS_FILE), content)?;
        Ok(())
    }

    /// Point the client at another API server
    pub fn set_base_url(&mut self, url: &str) {
        let url = url.trim().trim_end_matches('/').to_string();
        self.stored_base_url = Some(url.clone());
        if self.base_url_source != BaseUrlSource::Env {
            self.base_url = url;
            self.base_url_source = BaseUrlSource::Settings;
        }
    }

    /// Forget the stored base URL and timeout
    pub fn reset(&mut self) {
        self.stored_base_url = None;
        self.timeout_secs = DEFAULT_TIMEOUT.as_secs();
        if self.base_url_source != BaseUrlSource::Env {
            self.base_url = DEFAULT_BASE_URL.to_string();
            self.base_url_source = BaseUrlSource::Default;
        }
    }

    /// Timeout for each API request, `None` when disabled
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
    let settings_path = data_dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}
