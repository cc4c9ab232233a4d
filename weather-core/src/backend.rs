use crate::{BackendError, Config, WeatherData, backend::yr::YrBackend};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use std::{convert::TryFrom, fmt::Debug};

pub mod yr;

/// Identifiers of the backends compiled into this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendId {
    Yr,
}

impl BackendId {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendId::Yr => "yr",
        }
    }

    pub const fn all() -> &'static [BackendId] {
        &[BackendId::Yr]
    }
}

impl std::fmt::Display for BackendId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for BackendId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "yr" => Ok(BackendId::Yr),
            _ => Err(anyhow::anyhow!("Unknown backend '{value}'. Supported backends: yr.")),
        }
    }
}

/// A forecast source producing canonical [`WeatherData`].
#[async_trait]
pub trait WeatherBackend: Send + Sync + Debug {
    /// Current conditions for `location` plus up to `num_days` forecast days.
    ///
    /// Either a complete result is returned or the whole call fails.
    async fn fetch(&self, location: &str, num_days: usize) -> Result<WeatherData, BackendError>;
}

/// Construct a backend from config and explicit BackendId.
pub fn backend_from_config(id: BackendId, config: &Config) -> anyhow::Result<Box<dyn WeatherBackend>> {
    let settings = config.backend_config(id).cloned().unwrap_or_default();
    let http = Client::builder().build().context("Failed to build HTTP client")?;

    let boxed: Box<dyn WeatherBackend> = match id {
        BackendId::Yr => Box::new(YrBackend::from_settings(http, &settings, config.debug)),
    };

    Ok(boxed)
}

/// Construct the default backend from config, using `default_backend` field.
pub fn default_backend_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherBackend>> {
    let id = config.default_backend_id()?;
    backend_from_config(id, config)
}
