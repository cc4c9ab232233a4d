use reqwest::{Client, Url, header::USER_AGENT};
use tracing::debug;

use super::wire::{FEATURE_TYPE, RawForecastDocument};
use crate::error::BackendError;

pub const YR_URI: &str = "https://api.met.no/weatherapi/locationforecast/2.0/compact?";

/// Thin client for the locationforecast endpoint: one GET, one decode.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Client,
    base_url: String,
    user_agent: String,
    debug: bool,
}

impl ForecastClient {
    pub fn new(http: Client, base_url: String, user_agent: String, debug: bool) -> Self {
        Self { http, base_url, user_agent, debug }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for the given query parameters.
    pub fn url_for(&self, query: &str) -> String {
        format!("{}{}", self.base_url, query)
    }

    /// Fetch and validate the forecast document for `query` (e.g. `lat=1&lon=2`).
    pub async fn fetch_forecast(&self, query: &str) -> Result<RawForecastDocument, BackendError> {
        let url = self.url_for(query);
        if self.debug {
            debug!(%url, "fetching forecast");
        }

        let parsed_url = Url::parse(&url)
            .map_err(|e| BackendError::Request { url: url.clone(), reason: e.to_string() })?;

        let res = self
            .http
            .get(parsed_url)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .map_err(|source| BackendError::Transport { url: url.clone(), source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| BackendError::Transport { url: url.clone(), source })?;

        if self.debug {
            debug!(%url, %status, %body, "forecast response");
        }

        if !status.is_success() {
            return Err(BackendError::Status { url, status, body });
        }

        let doc: RawForecastDocument = match serde_json::from_str(&body) {
            Ok(doc) => doc,
            Err(source) => return Err(BackendError::Decode { url, source, body }),
        };

        if doc.kind != FEATURE_TYPE {
            return Err(BackendError::Validation { url, body });
        }

        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ForecastClient {
        ForecastClient::new(Client::new(), base_url.to_string(), "test/1.0".into(), false)
    }

    #[test]
    fn url_is_base_plus_query() {
        let c = client(YR_URI);
        assert_eq!(
            c.url_for("lat=59.91&lon=10.75"),
            "https://api.met.no/weatherapi/locationforecast/2.0/compact?lat=59.91&lon=10.75"
        );
    }

    #[tokio::test]
    async fn malformed_base_url_is_a_request_error() {
        let c = client("not a url?");
        let err = c.fetch_forecast("lat=1&lon=2").await.unwrap_err();
        assert!(matches!(err, BackendError::Request { .. }));
        assert_eq!(err.url(), Some("not a url?lat=1&lon=2"));
    }
}
