//! Turning a free-form location string into a forecast query.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::{error::BackendError, geocode::Geocoder};

static LAT_LON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]*(\.[0-9]+)?,-?[0-9]*(\.[0-9]+)?$").unwrap());

static LEADING_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9].*").unwrap());

/// How a location string will be presented to the forecast provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationQuery {
    /// `"lat,lon"`, kept as the caller wrote each half.
    Coordinates { lat: String, lon: String },
    /// Anything starting with a digit that isn't a coordinate pair.
    Zip(String),
    /// Free text place name.
    Place(String),
}

impl LocationQuery {
    /// Classify a raw location. First matching rule wins: coordinates, zip, place.
    pub fn classify(location: &str) -> Self {
        if LAT_LON.is_match(location) {
            if let Some((lat, lon)) = location.split_once(',') {
                if lat.parse::<f64>().is_ok() && lon.parse::<f64>().is_ok() {
                    return LocationQuery::Coordinates {
                        lat: lat.to_string(),
                        lon: lon.to_string(),
                    };
                }
            }
            debug!(location, "coordinate-like location failed numeric parsing");
        }

        if LEADING_DIGIT.is_match(location) {
            LocationQuery::Zip(location.to_string())
        } else {
            LocationQuery::Place(location.to_string())
        }
    }

    /// Provider query parameters for this location, percent-encoded.
    pub fn to_query(&self) -> String {
        match self {
            LocationQuery::Coordinates { lat, lon } => {
                format!("lat={}&lon={}", urlencoding::encode(lat), urlencoding::encode(lon))
            }
            LocationQuery::Zip(zip) => format!("zip={}", urlencoding::encode(zip)),
            LocationQuery::Place(name) => format!("q={}", urlencoding::encode(name)),
        }
    }
}

/// Same parameter shape as [`LocationQuery::to_query`], without encoding.
impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationQuery::Coordinates { lat, lon } => write!(f, "lat={lat}&lon={lon}"),
            LocationQuery::Zip(zip) => write!(f, "zip={zip}"),
            LocationQuery::Place(name) => write!(f, "q={name}"),
        }
    }
}

/// Outcome of location resolution: what to ask the provider, and what to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub query: String,
    pub display_name: String,
}

/// Resolve a raw location string.
///
/// Place names go through `geocoder` when one is supplied; an empty result set is
/// a hard failure. Without a geocoder the place name is sent to the provider as-is.
pub async fn resolve(
    location: &str,
    geocoder: Option<&dyn Geocoder>,
) -> Result<ResolvedLocation, BackendError> {
    let classified = LocationQuery::classify(location);

    let resolved = match (&classified, geocoder) {
        (LocationQuery::Place(name), Some(geocoder)) => {
            let place = geocoder
                .search(name)
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| BackendError::LocationNotFound(name.clone()))?;

            let query = LocationQuery::Coordinates { lat: place.lat.clone(), lon: place.lon.clone() };
            ResolvedLocation { query: query.to_query(), display_name: place.display_name() }
        }
        _ => ResolvedLocation { query: classified.to_query(), display_name: classified.to_string() },
    };

    info!(location, query = %resolved.query, display = %resolved.display_name, "resolved location");
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::GeoPlace;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct FixedGeocoder(Vec<GeoPlace>);

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn search(&self, _name: &str) -> Result<Vec<GeoPlace>, BackendError> {
            Ok(self.0.clone())
        }
    }

    fn oslo() -> GeoPlace {
        GeoPlace {
            name: "Oslo".into(),
            admin_region: "Oslo County".into(),
            country: "Norway".into(),
            lat: "59.91273".into(),
            lon: "10.74609".into(),
        }
    }

    #[test]
    fn coordinates_keep_their_order() {
        let q = LocationQuery::classify("59.91,10.75");
        assert_eq!(q.to_query(), "lat=59.91&lon=10.75");

        let q = LocationQuery::classify("-33.86,151.2");
        assert_eq!(q.to_query(), "lat=-33.86&lon=151.2");

        let q = LocationQuery::classify("10.75,59.91");
        assert_eq!(q.to_query(), "lat=10.75&lon=59.91");
    }

    #[test]
    fn leading_fraction_is_a_coordinate() {
        assert_eq!(
            LocationQuery::classify(".5,-.25"),
            LocationQuery::Coordinates { lat: ".5".into(), lon: "-.25".into() }
        );
    }

    #[test]
    fn digits_that_are_not_coordinates_are_zip_codes() {
        assert_eq!(LocationQuery::classify("0150"), LocationQuery::Zip("0150".into()));
        assert_eq!(LocationQuery::classify("12,abc"), LocationQuery::Zip("12,abc".into()));
        assert_eq!(LocationQuery::classify("90210-1234").to_query(), "zip=90210-1234");
    }

    #[test]
    fn regex_match_without_numbers_falls_through() {
        assert_eq!(LocationQuery::classify(","), LocationQuery::Place(",".into()));
        assert_eq!(LocationQuery::classify("-,-"), LocationQuery::Place("-,-".into()));
        assert_eq!(LocationQuery::classify("5,"), LocationQuery::Zip("5,".into()));
    }

    #[test]
    fn text_is_a_place() {
        assert_eq!(LocationQuery::classify("Bergen").to_query(), "q=Bergen");
        assert_eq!(LocationQuery::classify("New York").to_query(), "q=New%20York");
    }

    #[test]
    fn query_values_are_percent_encoded() {
        assert_eq!(LocationQuery::classify("Oslo & Akershus").to_query(), "q=Oslo%20%26%20Akershus");
        assert_eq!(LocationQuery::classify("Foo#bar").to_query(), "q=Foo%23bar");
        assert_eq!(LocationQuery::classify("12 ab&c").to_query(), "zip=12%20ab%26c");
        assert_eq!(LocationQuery::classify("-33.86,151.2").to_query(), "lat=-33.86&lon=151.2");
    }

    #[tokio::test]
    async fn resolve_without_geocoder_uses_query_as_display_name() {
        let resolved = resolve("Bergen", None).await.unwrap();
        assert_eq!(resolved.query, "q=Bergen");
        assert_eq!(resolved.display_name, "q=Bergen");

        let resolved = resolve("1,2", None).await.unwrap();
        assert_eq!(resolved.query, "lat=1&lon=2");
        assert_eq!(resolved.display_name, "lat=1&lon=2");

        let resolved = resolve("Sankt Petersburg", None).await.unwrap();
        assert_eq!(resolved.query, "q=Sankt%20Petersburg");
        assert_eq!(resolved.display_name, "q=Sankt Petersburg");
    }

    #[tokio::test]
    async fn resolve_place_through_geocoder() {
        let geocoder = FixedGeocoder(vec![oslo()]);
        let resolved = resolve("Oslo", Some(&geocoder)).await.unwrap();

        assert_eq!(resolved.query, "lat=59.91273&lon=10.74609");
        assert_eq!(resolved.display_name, "Oslo, Oslo County, Norway");
    }

    #[tokio::test]
    async fn geocoder_is_not_consulted_for_coordinates_or_zip() {
        let geocoder = FixedGeocoder(vec![]);

        let resolved = resolve("1.5,2.5", Some(&geocoder)).await.unwrap();
        assert_eq!(resolved.query, "lat=1.5&lon=2.5");

        let resolved = resolve("0150", Some(&geocoder)).await.unwrap();
        assert_eq!(resolved.query, "zip=0150");
    }

    #[tokio::test]
    async fn empty_geocoder_result_is_fatal() {
        let geocoder = FixedGeocoder(vec![]);
        let err = resolve("Atlantis", Some(&geocoder)).await.unwrap_err();
        assert!(matches!(err, BackendError::LocationNotFound(name) if name == "Atlantis"));
    }
}
