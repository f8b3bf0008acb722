//! Configuration management.
//!
//! The harvest reads a single settings file (JSON or TOML, picked by extension)
//! with `HARVEST_LAST_RECORD` / `HARVEST_FIRST_RECORD` environment overrides.
//! The portal's own settings keys are accepted as aliases:
//!
//! ```json
//! {
//!   "cookies": { "JSESSIONID": "..." },
//!   "url": "https://portal.example.ro",
//!   "tenant": "6",
//!   "lastRecord": 120000
//! }
//! ```

mod storage;

pub use storage::StorageLayout;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::HarvestError;
use crate::utils::DEFAULT_USER_AGENT;

/// Settings file names searched in the working directory
const CONFIG_FILE_NAMES: &[&str] = &["settings.json", "harvest.toml"];

const LAST_RECORD_VAR: &str = "HARVEST_LAST_RECORD";
const FIRST_RECORD_VAR: &str = "HARVEST_FIRST_RECORD";

/// Run configuration, loaded once and never mutated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Session cookies of an authenticated portal login
    #[serde(default)]
    pub cookies: BTreeMap<String, String>,

    /// Portal base URL, without trailing path
    #[serde(alias = "url")]
    pub base_url: Url,

    /// Tenant identifier of the library on the media provider
    #[serde(alias = "tenant", deserialize_with = "string_or_number")]
    pub tenant_id: String,

    /// Highest record id; the walk starts here and descends
    #[serde(alias = "lastRecord")]
    pub last_record: u64,

    /// Lower bound of the walk (exclusive)
    #[serde(default = "default_first_record", alias = "firstRecord")]
    pub first_record: u64,

    #[serde(default)]
    pub storage: StorageLayout,

    #[serde(default)]
    pub timeouts: TimeoutConfig,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Accept `"tenant": 6` as well as `"tenant": "6"`
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(i64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}

fn override_record_id<F>(lookup: &F, name: &str) -> Result<Option<u64>, HarvestError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| HarvestError::Config(format!("{}={}: {}", name, value, e))),
        None => Ok(None),
    }
}

fn default_first_record() -> u64 {
    1
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl HarvestConfig {
    /// Minimal configuration with default storage and timeouts
    pub fn new(base_url: Url, tenant_id: impl Into<String>, last_record: u64) -> Self {
        Self {
            cookies: BTreeMap::new(),
            base_url,
            tenant_id: tenant_id.into(),
            last_record,
            first_record: default_first_record(),
            storage: StorageLayout::default(),
            timeouts: TimeoutConfig::default(),
            user_agent: default_user_agent(),
        }
    }

    /// Portal URL for an absolute path such as `/ro/record`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Record ids the run visits, highest first
    pub fn record_ids(&self) -> impl Iterator<Item = u64> {
        (self.first_record.saturating_add(1)..=self.last_record).rev()
    }

    /// Override the walk bounds from `HARVEST_LAST_RECORD` / `HARVEST_FIRST_RECORD`
    pub fn apply_env_overrides(&mut self) -> Result<(), HarvestError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Override the walk bounds from `lookup`, keyed by the environment variable names
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), HarvestError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = override_record_id(&lookup, LAST_RECORD_VAR)? {
            self.last_record = value;
        }
        if let Some(value) = override_record_id(&lookup, FIRST_RECORD_VAR)? {
            self.first_record = value;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), HarvestError> {
        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(HarvestError::Config(format!(
                "base_url must be http(s): {}",
                self.base_url
            )));
        }

        if self.tenant_id.trim().is_empty() {
            return Err(HarvestError::Config("tenant_id is empty".to_string()));
        }

        Ok(())
    }
}

/// Request timeouts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Record and fragment requests
    #[serde(default = "default_metadata_secs")]
    pub metadata_secs: u64,

    /// Streamed media downloads
    #[serde(default = "default_download_secs")]
    pub download_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            metadata_secs: default_metadata_secs(),
            download_secs: default_download_secs(),
        }
    }
}

impl TimeoutConfig {
    pub fn metadata(&self) -> Duration {
        Duration::from_secs(self.metadata_secs)
    }

    pub fn download(&self) -> Duration {
        Duration::from_secs(self.download_secs)
    }
}

fn default_metadata_secs() -> u64 {
    5
}

fn default_download_secs() -> u64 {
    10
}

/// Load configuration from a file, with `HARVEST_*` environment overrides
pub fn load_config(path: &Path) -> Result<HarvestConfig, HarvestError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        HarvestError::Config(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let mut config: HarvestConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => {
            toml::from_str(&content).map_err(|e| HarvestError::Config(e.to_string()))?
        }
        _ => serde_json::from_str(&content).map_err(|e| HarvestError::Config(e.to_string()))?,
    };

    config.apply_env_overrides()?;
    config.validate()?;

    Ok(config)
}

/// Find a settings file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    find_config_file_in(Path::new(""), dirs::config_dir().as_deref())
}

/// Search `work_dir` for each of the settings file names in turn, then
/// `<config_dir>/catalog-harvester/settings.json`
pub fn find_config_file_in(work_dir: &Path, config_dir: Option<&Path>) -> Option<PathBuf> {
    let local = CONFIG_FILE_NAMES
        .iter()
        .map(|name| work_dir.join(name))
        .find(|path| path.is_file());

    local.or_else(|| {
        config_dir
            .map(|dir| dir.join("catalog-harvester").join("settings.json"))
            .filter(|path| path.is_file())
    })
}
