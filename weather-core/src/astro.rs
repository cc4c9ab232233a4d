//! Optional sun/moon lookups attached to forecast days.
//!
//! Sources plug in through [`Astronomy`]. A failing source never fails a forecast:
//! the day simply carries no astronomy.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt::Debug;
use tracing::warn;

use crate::model::{Astro, Day};

#[async_trait]
pub trait Astronomy: Send + Sync + Debug {
    async fn lookup(&self, lat: f64, lon: f64, date: NaiveDate) -> anyhow::Result<Astro>;
}

/// Fill `astronomy` on each day, one lookup at a time.
pub async fn annotate_days(source: &dyn Astronomy, lat: f64, lon: f64, days: &mut [Day]) {
    for day in days {
        day.astronomy = match source.lookup(lat, lon, day.date).await {
            Ok(astro) => Some(astro),
            Err(e) => {
                warn!(date = %day.date, "astronomy lookup failed: {e:#}");
                None
            }
        };
    }
}
