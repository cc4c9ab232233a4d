//! Forward geocoding for free-text place names.
//! The bundled implementation talks to the GeoNames search API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use tracing::debug;

use crate::error::BackendError;

pub const GEONAMES_URL: &str = "http://api.geonames.org/searchJSON";

/// Best-effort place match returned by a geocoder.
///
/// Coordinates stay textual so they reach the forecast query exactly as the
/// geocoder reported them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoPlace {
    pub name: String,
    pub admin_region: String,
    pub country: String,
    pub lat: String,
    pub lon: String,
}

impl GeoPlace {
    /// `"<name>, <admin-region>, <country>"`, skipping empty parts.
    pub fn display_name(&self) -> String {
        [self.name.as_str(), self.admin_region.as_str(), self.country.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Candidate places for `name`, best match first.
    async fn search(&self, name: &str) -> Result<Vec<GeoPlace>, BackendError>;
}

#[derive(Debug, Clone)]
pub struct GeoNamesClient {
    http: Client,
    base_url: String,
    username: String,
}

impl GeoNamesClient {
    pub fn new(http: Client, username: String) -> Self {
        Self::with_base_url(http, username, GEONAMES_URL.to_string())
    }

    pub fn with_base_url(http: Client, username: String, base_url: String) -> Self {
        Self { http, base_url, username }
    }
}

#[derive(Debug, Deserialize)]
struct GnResponse {
    #[serde(default)]
    geonames: Vec<GnPlace>,
    status: Option<GnStatus>,
}

#[derive(Debug, Deserialize)]
struct GnStatus {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GnPlace {
    name: String,
    #[serde(default)]
    admin_name1: String,
    #[serde(default)]
    country_name: String,
    lat: String,
    lng: String,
}

impl From<GnPlace> for GeoPlace {
    fn from(p: GnPlace) -> Self {
        GeoPlace {
            name: p.name,
            admin_region: p.admin_name1,
            country: p.country_name,
            lat: p.lat,
            lon: p.lng,
        }
    }
}

#[async_trait]
impl Geocoder for GeoNamesClient {
    async fn search(&self, name: &str) -> Result<Vec<GeoPlace>, BackendError> {
        let request = self
            .http
            .get(&self.base_url)
            .query(&[("q", name), ("maxRows", "1"), ("username", self.username.as_str())])
            .build()
            .map_err(|e| BackendError::Request { url: self.base_url.clone(), reason: e.to_string() })?;
        let url = request.url().to_string();
        debug!(%url, place = name, "geocoding place name");

        let res = self
            .http
            .execute(request)
            .await
            .map_err(|source| BackendError::Transport { url: url.clone(), source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| BackendError::Transport { url: url.clone(), source })?;

        if !status.is_success() {
            return Err(BackendError::Status { url, status, body });
        }

        let parsed: GnResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(source) => return Err(BackendError::Decode { url, source, body }),
        };

        if let Some(status) = parsed.status {
            return Err(BackendError::Geocoding { query: name.to_string(), reason: status.message });
        }

        Ok(parsed.geonames.into_iter().map(GeoPlace::from).collect())
    }
}
