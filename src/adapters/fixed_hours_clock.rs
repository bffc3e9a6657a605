//! Deterministic market-hours clock.
//!
//! Approximates the US cash session as 14:30-21:00 UTC, Monday through
//! Friday. Ignores exchange holidays and the DST drift of the underlying
//! local session; callers that need exact calendars should supply their
//! own `ClockPort`.

use chrono::{Datelike, Timelike, Utc, Weekday};

use crate::ports::clock_port::ClockPort;

const OPEN_MINUTES: u32 = 14 * 60 + 30;
const CLOSE_MINUTES: u32 = 21 * 60;

pub struct FixedHoursClock;

impl FixedHoursClock {
    fn is_open_at(weekday: Weekday, hour: u32, minute: u32) -> bool {
        if matches!(weekday, Weekday::Sat | Weekday::Sun) {
            return false;
        }
        let minutes = hour * 60 + minute;
        (OPEN_MINUTES..CLOSE_MINUTES).contains(&minutes)
    }
}

impl ClockPort for FixedHoursClock {
    fn is_open(&self) -> bool {
        let now = Utc::now();
        Self::is_open_at(now.weekday(), now.hour(), now.minute())
    }
}
