//! Wire types for the MET Norway locationforecast 2.0 document.
//!
//! Every measurement is optional: the provider omits fields and whole blocks
//! (notably `next_6_hours` near the end of the series).

use serde::Deserialize;

pub(crate) const FEATURE_TYPE: &str = "Feature";

#[derive(Debug, Clone, Deserialize)]
pub struct RawForecastDocument {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Properties,
}

impl RawForecastDocument {
    /// `(lat, lon)` from the GeoJSON point; GeoJSON stores longitude first.
    pub fn lat_lon(&self) -> Option<(f64, f64)> {
        match self.geometry.coordinates.as_slice() {
            [lon, lat, ..] => Some((*lat, *lon)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Properties {
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub timeseries: Vec<RawSample>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    pub updated_at: Option<String>,
    #[serde(default)]
    pub units: Units,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Units {
    pub air_temperature: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSample {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub data: SampleData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SampleData {
    #[serde(default)]
    pub instant: Instant,
    pub next_1_hours: Option<Period>,
    pub next_6_hours: Option<Period>,
    pub next_12_hours: Option<Period>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Instant {
    #[serde(default)]
    pub details: InstantDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstantDetails {
    pub air_pressure_at_sea_level: Option<f64>,
    pub air_temperature: Option<f64>,
    pub cloud_area_fraction: Option<f64>,
    pub relative_humidity: Option<f64>,
    pub wind_from_direction: Option<f64>,
    pub wind_speed: Option<f64>,
}

/// A forward-looking `next_N_hours` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Period {
    pub summary: Option<Summary>,
    pub details: Option<PeriodDetails>,
}

impl Period {
    pub fn symbol_code(&self) -> Option<&str> {
        self.summary.as_ref()?.symbol_code.as_deref()
    }

    pub fn precipitation_amount(&self) -> Option<f64> {
        self.details.as_ref()?.precipitation_amount
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Summary {
    pub symbol_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeriodDetails {
    pub precipitation_amount: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_blocks_decode_as_none() {
        let json = r#"{
            "time": "2024-06-01T12:00:00Z",
            "data": { "instant": { "details": { "air_temperature": 14.2 } } }
        }"#;
        let sample: RawSample = serde_json::from_str(json).unwrap();

        assert_eq!(sample.data.instant.details.air_temperature, Some(14.2));
        assert!(sample.data.instant.details.wind_speed.is_none());
        assert!(sample.data.next_1_hours.is_none());
        assert!(sample.data.next_6_hours.is_none());
        assert!(sample.data.next_12_hours.is_none());
    }

    #[test]
    fn twelve_hour_block_has_no_details() {
        let json = r#"{
            "time": "2024-06-01T12:00:00Z",
            "data": {
                "instant": { "details": {} },
                "next_12_hours": { "summary": { "symbol_code": "fair_day" } }
            }
        }"#;
        let sample: RawSample = serde_json::from_str(json).unwrap();
        let next12 = sample.data.next_12_hours.unwrap();

        assert_eq!(next12.symbol_code(), Some("fair_day"));
        assert_eq!(next12.precipitation_amount(), None);
    }

    #[test]
    fn lat_lon_swaps_geojson_order() {
        let json = r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[10.75,59.91,12]},"properties":{"timeseries":[]}}"#;
        let doc: RawForecastDocument = serde_json::from_str(json).unwrap();

        assert_eq!(doc.kind, FEATURE_TYPE);
        assert_eq!(doc.lat_lon(), Some((59.91, 10.75)));
    }

    #[test]
    fn provider_error_payload_still_decodes() {
        let doc: RawForecastDocument =
            serde_json::from_str(r#"{"error":{"code":400,"message":"bad lat"}}"#).unwrap();
        assert_eq!(doc.kind, "");
        assert!(doc.properties.timeseries.is_empty());
    }

    #[test]
    fn lat_lon_needs_two_coordinates() {
        let doc: RawForecastDocument = serde_json::from_str(r#"{"type":"Feature"}"#).unwrap();
        assert_eq!(doc.lat_lon(), None);
        assert!(doc.properties.timeseries.is_empty());
    }
}
