//! Mapping of one locationforecast sample onto a canonical [`Condition`].

use chrono::{DateTime, Utc};
use std::{collections::HashMap, sync::LazyLock};
use tracing::warn;

use super::wire::RawSample;
use crate::model::{Condition, WeatherCode};

static SYMBOL_CODES: LazyLock<HashMap<&'static str, WeatherCode>> = LazyLock::new(|| {
    use WeatherCode::*;

    HashMap::from([
        ("clearsky_night", Sunny),
        ("clearsky_day", Sunny),
        ("cloudy", Cloudy),
        ("fair_day", PartlyCloudy),
        ("fair_night", PartlyCloudy),
        ("fog", Fog),
        ("heavyrain", HeavyRain),
        ("heavyrainthunder", ThunderyHeavyRain),
        ("heavyrainshowers_day", HeavyShowers),
        ("heavyrainshowers_night", HeavyShowers),
        ("heavyrainshowersandthunder_day", ThunderyHeavyRain),
        ("heavyrainshowersandthunder_night", ThunderyHeavyRain),
        ("heavysleet", HeavySnowShowers),
        ("heavysleetandthunder", ThunderySnowShowers),
        ("heavysleetshowers_day", HeavySnowShowers),
        ("heavysleetshowers_night", HeavySnowShowers),
        ("heavysleetshowersandthunder_day", ThunderySnowShowers),
        ("heavysleetshowersandthunder_night", ThunderySnowShowers),
        ("heavysnow", HeavySnow),
        ("heavysnowandthunder", ThunderySnowShowers),
        ("heavysnowshowers_day", HeavySnowShowers),
        ("heavysnowshowers_night", HeavySnowShowers),
        ("heavysnowshowersandthunder_day", ThunderySnowShowers),
        ("heavysnowshowersandthunder_night", ThunderySnowShowers),
        ("lightrain", LightRain),
        ("lightrainandthunder", ThunderyShowers),
        ("lightrainshowers_day", LightShowers),
        ("lightrainshowers_night", LightShowers),
        ("lightrainshowersandthunder_day", ThunderyShowers),
        ("lightrainshowersandthunder_night", ThunderyShowers),
        ("lightsleet", LightSleet),
        ("lightsleetandthunder", ThunderySnowShowers),
        ("lightsleetshowers_day", LightSleetShowers),
        ("lightsleetshowers_night", LightSleetShowers),
        ("lightsnow", LightSnow),
        ("lightsnowandthunder", ThunderySnowShowers),
        ("lightsnowshowers_day", ThunderySnowShowers),
        ("lightsnowshowers_night", ThunderySnowShowers),
        ("lightsleetshowersandthunder_day", ThunderySnowShowers),
        ("lightsleetshowersandthunder_night", ThunderySnowShowers),
        ("partlycloudy_day", PartlyCloudy),
        ("partlycloudy_night", PartlyCloudy),
        ("rain", LightRain),
        ("rainandthunder", ThunderyShowers),
        ("rainshowers_day", LightShowers),
        ("rainshowers_night", LightShowers),
        ("rainshowersandthunder_day", ThunderyShowers),
        ("rainshowersandthunder_night", ThunderyShowers),
        ("sleet", LightSleet),
        ("sleetandthunder", ThunderySnowShowers),
        ("sleetshowers_day", LightSleetShowers),
        ("sleetshowers_night", LightSleetShowers),
        ("sleetshowersandthunder_day", ThunderyShowers),
        ("sleetshowersandthunder_night", ThunderyShowers),
        ("snow", HeavySnow),
        ("snowandthunder", ThunderySnowShowers),
        ("snowshowers_day", HeavySnowShowers),
        ("snowshowers_night", HeavySnowShowers),
        ("snowshowersandthunder_day", ThunderyShowers),
        ("snowshowersandthunder_night", ThunderyShowers),
    ])
});

/// Canonical category for a provider symbol code, if the code is known.
pub fn weather_code(symbol_code: &str) -> Option<WeatherCode> {
    SYMBOL_CODES.get(symbol_code).copied()
}

/// Map a raw sample. Never fails: missing inputs give missing outputs.
///
/// The category comes from the 6 hour summary, then the 1 hour summary.
/// Precipitation follows the same precedence.
pub fn map_condition(sample: &RawSample) -> Condition {
    let data = &sample.data;
    let details = &data.instant.details;
    let next6 = data.next_6_hours.as_ref();
    let next1 = data.next_1_hours.as_ref();

    let code = next6
        .and_then(|p| p.symbol_code())
        .and_then(weather_code)
        .or_else(|| next1.and_then(|p| p.symbol_code()).and_then(weather_code))
        .unwrap_or(WeatherCode::Unknown);

    let precip_mm = next6
        .and_then(|p| p.precipitation_amount())
        .or_else(|| next1.and_then(|p| p.precipitation_amount()));

    let time = match DateTime::parse_from_rfc3339(&sample.time) {
        Ok(t) => t.with_timezone(&Utc),
        Err(e) => {
            warn!(time = %sample.time, "unparseable sample timestamp: {e}");
            DateTime::<Utc>::default()
        }
    };

    Condition {
        time,
        code,
        temp_c: details.air_temperature,
        precip_m: precip_mm.map(|mm| mm / 1000.0),
        wind_speed_kmph: details.wind_speed.map(|speed| speed / 3.6),
        wind_dir_degree: details.wind_from_direction.map(|deg| deg.round() as i32),
        humidity: details.relative_humidity.map(|h| h.round() as i32),
    }
}
