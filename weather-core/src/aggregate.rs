//! Grouping of chronological conditions into calendar-day buckets.

use tracing::warn;

use crate::model::{Condition, Day};

/// Group `samples` into at most `max_days` calendar days (UTC dates).
///
/// Samples must already be sorted by time; they are never reordered. Days are
/// compared by full date, so the 31st of one month and the 1st of the next are
/// separate even when they are adjacent in the input. Input after the last
/// requested day is not consumed.
///
/// A sample dated before the open day (a degraded timestamp in a sorted
/// series) stays in the open day instead of starting a new one, so emitted
/// dates are strictly increasing.
pub fn group_by_day<I>(samples: I, max_days: usize) -> Vec<Day>
where
    I: IntoIterator<Item = Condition>,
{
    let mut forecast = Vec::new();
    if max_days == 0 {
        return forecast;
    }

    let mut day: Option<Day> = None;
    for slot in samples {
        let date = slot.time.date_naive();
        match day.as_mut() {
            Some(current) if current.date == date => current.slots.push(slot),
            Some(current) if date < current.date => {
                warn!(%date, open = %current.date, "out-of-order sample kept in the open day");
                current.slots.push(slot);
            }
            _ => {
                if let Some(done) = day.take() {
                    forecast.push(done);
                    if forecast.len() >= max_days {
                        return forecast;
                    }
                }
                let mut fresh = Day::new(date);
                fresh.slots.push(slot);
                day = Some(fresh);
            }
        }
    }

    if let Some(last) = day {
        forecast.push(last);
    }
    forecast
}
