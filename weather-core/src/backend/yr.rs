//! MET Norway (yr.no) locationforecast backend.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::{
    BackendError, WeatherData,
    aggregate::group_by_day,
    astro::{Astronomy, annotate_days},
    backend::WeatherBackend,
    config::BackendConfig,
    geocode::{GeoNamesClient, Geocoder},
    location::resolve as resolve_location,
};

mod client;
mod condition;
mod wire;

pub use client::{ForecastClient, YR_URI};
pub use condition::{map_condition, weather_code};
pub use wire::{RawForecastDocument, RawSample};

/// MET Norway rejects anonymous clients, so this is always sent.
pub const DEFAULT_USER_AGENT: &str = concat!("metweather/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct YrBackend {
    client: ForecastClient,
    geocoder: Option<Arc<dyn Geocoder>>,
    astronomy: Option<Arc<dyn Astronomy>>,
}

impl YrBackend {
    pub fn new(client: ForecastClient) -> Self {
        Self { client, geocoder: None, astronomy: None }
    }

    /// Build from per-backend settings. A GeoNames geocoder is attached when a
    /// username is configured; otherwise place names are sent to the provider verbatim.
    pub fn from_settings(http: Client, settings: &BackendConfig, debug: bool) -> Self {
        let user_agent = settings.user_agent.clone().unwrap_or_else(|| {
            warn!("no user agent configured for yr, sending '{DEFAULT_USER_AGENT}'");
            DEFAULT_USER_AGENT.to_string()
        });
        let base_url = settings.base_url.clone().unwrap_or_else(|| YR_URI.to_string());

        let mut backend = Self::new(ForecastClient::new(http.clone(), base_url, user_agent, debug));
        if let Some(username) = &settings.geonames_username {
            backend = backend.with_geocoder(Arc::new(GeoNamesClient::new(http, username.clone())));
        }
        backend
    }

    pub fn with_geocoder(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    pub fn with_astronomy(mut self, astronomy: Arc<dyn Astronomy>) -> Self {
        self.astronomy = Some(astronomy);
        self
    }
}

#[async_trait]
impl WeatherBackend for YrBackend {
    #[instrument(skip(self), level = "info")]
    async fn fetch(&self, location: &str, num_days: usize) -> Result<WeatherData, BackendError> {
        let resolved = resolve_location(location, self.geocoder.as_deref()).await?;
        let doc = self.client.fetch_forecast(&resolved.query).await?;

        let meta = &doc.properties.meta;
        debug!(
            updated_at = meta.updated_at.as_deref().unwrap_or("-"),
            temperature_unit = meta.units.air_temperature.as_deref().unwrap_or("-"),
            samples = doc.properties.timeseries.len(),
            "decoded forecast"
        );

        let series = &doc.properties.timeseries;
        let first = series
            .first()
            .ok_or_else(|| BackendError::EmptyTimeseries { url: self.client.url_for(&resolved.query) })?;

        let mut ret = WeatherData {
            location: resolved.display_name,
            current: map_condition(first),
            forecast: Vec::new(),
        };

        if num_days == 0 {
            return Ok(ret);
        }
        ret.forecast = group_by_day(series.iter().map(map_condition), num_days);

        if let (Some(astronomy), Some((lat, lon))) = (self.astronomy.as_deref(), doc.lat_lon()) {
            annotate_days(astronomy, lat, lon, &mut ret.forecast).await;
        }

        Ok(ret)
    }
}
