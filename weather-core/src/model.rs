use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical weather category shared by every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCode {
    #[default]
    Unknown,
    Cloudy,
    Fog,
    HeavyRain,
    HeavyShowers,
    HeavySnow,
    HeavySnowShowers,
    LightRain,
    LightShowers,
    LightSleet,
    LightSleetShowers,
    LightSnow,
    LightSnowShowers,
    PartlyCloudy,
    Sunny,
    ThunderyHeavyRain,
    ThunderyShowers,
    ThunderySnowShowers,
    VeryCloudy,
}

impl WeatherCode {
    pub fn description(&self) -> &'static str {
        match self {
            WeatherCode::Unknown => "Unknown",
            WeatherCode::Cloudy => "Cloudy",
            WeatherCode::Fog => "Fog",
            WeatherCode::HeavyRain => "Heavy rain",
            WeatherCode::HeavyShowers => "Heavy showers",
            WeatherCode::HeavySnow => "Heavy snow",
            WeatherCode::HeavySnowShowers => "Heavy snow showers",
            WeatherCode::LightRain => "Light rain",
            WeatherCode::LightShowers => "Light showers",
            WeatherCode::LightSleet => "Light sleet",
            WeatherCode::LightSleetShowers => "Light sleet showers",
            WeatherCode::LightSnow => "Light snow",
            WeatherCode::LightSnowShowers => "Light snow showers",
            WeatherCode::PartlyCloudy => "Partly cloudy",
            WeatherCode::Sunny => "Sunny",
            WeatherCode::ThunderyHeavyRain => "Thundery heavy rain",
            WeatherCode::ThunderyShowers => "Thundery showers",
            WeatherCode::ThunderySnowShowers => "Thundery snow showers",
            WeatherCode::VeryCloudy => "Very cloudy",
        }
    }
}

impl std::fmt::Display for WeatherCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Conditions at a single instant, normalized across backends.
///
/// Optional fields are only `Some` when the upstream sample carried the value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Condition {
    pub time: DateTime<Utc>,
    pub code: WeatherCode,
    pub temp_c: Option<f64>,
    pub precip_m: Option<f64>,
    pub wind_speed_kmph: Option<f64>,
    pub wind_dir_degree: Option<i32>,
    pub humidity: Option<i32>,
}

/// Sun and moon times for one day, as reported by an astronomy source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Astro {
    pub sunrise: Option<NaiveTime>,
    pub sunset: Option<NaiveTime>,
    pub moonrise: Option<NaiveTime>,
    pub moonset: Option<NaiveTime>,
}

/// One calendar day of forecast slots, in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    pub date: NaiveDate,
    pub slots: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub astronomy: Option<Astro>,
}

impl Day {
    pub fn new(date: NaiveDate) -> Self {
        Self { date, slots: Vec::new(), astronomy: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub location: String,
    pub current: Condition,
    pub forecast: Vec<Day>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_is_the_default_code() {
        assert_eq!(WeatherCode::default(), WeatherCode::Unknown);
        assert_eq!(Condition::default().code, WeatherCode::Unknown);
    }

    #[test]
    fn codes_serialize_as_snake_case() {
        let json = serde_json::to_string(&WeatherCode::ThunderySnowShowers).unwrap();
        assert_eq!(json, "\"thundery_snow_showers\"");
    }

    #[test]
    fn day_without_astronomy_omits_the_field() {
        let day = Day::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        let json = serde_json::to_value(&day).unwrap();
        assert!(json.get("astronomy").is_none());
        assert_eq!(json["slots"], serde_json::json!([]));
    }
}
