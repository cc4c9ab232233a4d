//! Errors surfaced by weather backends.

use thiserror::Error;

/// Failure of a single backend `fetch`. Nothing here is retried internally.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Failed to build request URL '{url}': {reason}")]
    Request { url: String, reason: String },

    #[error("Unable to get ({url}): {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed with status {status}: {}", truncate_body(.body))]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Unable to decode response ({url}): {source}; body: {}", truncate_body(.body))]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("Erroneous response body from {url}: {}", truncate_body(.body))]
    Validation { url: String, body: String },

    #[error("Forecast from {url} contained no timeseries samples")]
    EmptyTimeseries { url: String },

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Geocoding failed for '{query}': {reason}")]
    Geocoding { query: String, reason: String },
}

impl BackendError {
    /// Raw response body, when the failure happened after the body was read.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } | Self::Decode { body, .. } | Self::Validation { body, .. } => {
                Some(body)
            }
            _ => None,
        }
    }

    /// URL of the request that failed, if one was attempted.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Request { url, .. }
            | Self::Transport { url, .. }
            | Self::Status { url, .. }
            | Self::Decode { url, .. }
            | Self::Validation { url, .. }
            | Self::EmptyTimeseries { url } => Some(url),
            Self::LocationNotFound(_) | Self::Geocoding { .. } => None,
        }
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("{}"), "{}");
    }

    #[test]
    fn truncate_body_cuts_on_char_boundary() {
        let body = "ø".repeat(300);
        let cut = truncate_body(&body);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }

    #[test]
    fn validation_error_exposes_body_and_url() {
        let err = BackendError::Validation {
            url: "https://example.test/forecast?lat=1&lon=2".into(),
            body: r#"{"type":"Error"}"#.into(),
        };
        assert_eq!(err.body(), Some(r#"{"type":"Error"}"#));
        assert_eq!(err.url(), Some("https://example.test/forecast?lat=1&lon=2"));
        assert!(err.to_string().contains("Erroneous response body"));
    }

    #[test]
    fn location_not_found_has_no_url() {
        let err = BackendError::LocationNotFound("Atlantis".into());
        assert!(err.url().is_none());
        assert!(err.body().is_none());
        assert_eq!(err.to_string(), "Location not found: Atlantis");
    }
}
