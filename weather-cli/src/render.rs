use weather_core::{Astro, Condition, Day, WeatherData};

/// Plain-text summary of normalized weather data.
pub fn render(data: &WeatherData) -> String {
    let mut output = format!("Weather for {}\n\n", data.location);
    output.push_str(&format!(
        "Now ({}): {}\n",
        data.current.time.format("%Y-%m-%d %H:%M UTC"),
        describe(&data.current)
    ));

    for day in &data.forecast {
        output.push('\n');
        output.push_str(&day_header(day));
        for slot in &day.slots {
            output.push_str(&format!("  {}  {}\n", slot.time.format("%H:%M"), describe(slot)));
        }
    }
    output
}

fn day_header(day: &Day) -> String {
    let temps = day.slots.iter().filter_map(|s| s.temp_c);
    let range = temps.fold(None, |acc: Option<(f64, f64)>, t| match acc {
        Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
        None => Some((t, t)),
    });

    let mut header = day.date.format("%a %Y-%m-%d").to_string();
    if let Some((lo, hi)) = range {
        header.push_str(&format!(": {lo:.1} to {hi:.1}\u{00b0}C"));
    }
    if let Some(Astro { sunrise: Some(rise), sunset: Some(set), .. }) = &day.astronomy {
        header.push_str(&format!(" (sun {} - {})", rise.format("%H:%M"), set.format("%H:%M")));
    }
    header.push('\n');
    header
}

fn describe(c: &Condition) -> String {
    let mut parts = vec![c.code.to_string()];
    if let Some(t) = c.temp_c {
        parts.push(format!("{t:.1}\u{00b0}C"));
    }
    if let Some(speed) = c.wind_speed_kmph {
        let from = c.wind_dir_degree.map(|d| format!(" from {d}\u{00b0}")).unwrap_or_default();
        parts.push(format!("wind {speed:.1} km/h{from}"));
    }
    if let Some(precip) = c.precip_m {
        parts.push(format!("precip {:.1} mm", precip * 1000.0));
    }
    if let Some(h) = c.humidity {
        parts.push(format!("humidity {h}%"));
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use weather_core::WeatherCode;

    fn slot(hour: u32, temp: Option<f64>) -> Condition {
        Condition {
            time: Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap(),
            code: WeatherCode::PartlyCloudy,
            temp_c: temp,
            ..Condition::default()
        }
    }

    #[test]
    fn absent_fields_are_not_printed() {
        let text = describe(&slot(12, None));
        assert_eq!(text, "Partly cloudy");
    }

    #[test]
    fn day_header_shows_temperature_range() {
        let day = Day {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            slots: vec![slot(6, Some(9.5)), slot(12, None), slot(18, Some(15.3))],
            astronomy: None,
        };
        assert_eq!(day_header(&day), "Sat 2024-06-01: 9.5 to 15.3\u{00b0}C\n");
    }

    #[test]
    fn render_lists_every_slot() {
        let data = WeatherData {
            location: "Oslo, Oslo, Norway".into(),
            current: slot(6, Some(9.5)),
            forecast: vec![Day {
                date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                slots: vec![slot(6, Some(9.5)), slot(12, Some(14.0))],
                astronomy: None,
            }],
        };
        let text = render(&data);

        assert!(text.starts_with("Weather for Oslo, Oslo, Norway\n"));
        assert!(text.contains("Now (2024-06-01 06:00 UTC): Partly cloudy, 9.5\u{00b0}C"));
        assert!(text.contains("  12:00  Partly cloudy, 14.0\u{00b0}C\n"));
    }
}
