use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::backend::BackendId;

/// Settings for a single backend. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Contact string sent as `User-Agent`, e.g. "myapp/1.0 you@example.com".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Enables place-name geocoding through GeoNames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geonames_username: Option<String>,

    /// Overrides the forecast endpoint (must end where query parameters begin).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional default backend id, e.g. "yr".
    pub default_backend: Option<String>,

    /// Log request URLs and raw response bodies.
    #[serde(default)]
    pub debug: bool,

    /// Example TOML:
    /// [backends.yr]
    /// user_agent = "..."
    #[serde(default)]
    pub backends: HashMap<String, BackendConfig>,
}

impl Config {
    /// Return the default backend as a strongly-typed BackendId.
    pub fn default_backend_id(&self) -> Result<BackendId> {
        let s = self.default_backend.as_ref().ok_or_else(|| {
            anyhow::anyhow!(
                "No default backend configured.\n\
                 Hint: run `metweather configure <backend>` (e.g. `metweather configure yr`) first."
            )
        })?;

        BackendId::try_from(s.as_str())
    }

    pub fn backend_config(&self, id: BackendId) -> Option<&BackendConfig> {
        self.backends.get(id.as_str())
    }

    /// Store default backend as string.
    pub fn set_default_backend(&mut self, id: BackendId) {
        self.default_backend = Some(id.as_str().to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "metweather", "metweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set/replace a backend's settings; the first configured backend becomes the default.
    pub fn upsert_backend_config(&mut self, backend_id: BackendId, settings: BackendConfig) {
        self.backends.insert(backend_id.as_str().to_string(), settings);

        if self.default_backend.is_none() {
            self.default_backend = Some(backend_id.to_string());
        }
    }

    pub fn is_backend_configured(&self, backend_id: BackendId) -> bool {
        self.backend_config(backend_id).is_some()
    }
}
