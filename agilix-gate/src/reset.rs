//! Countdown to the daily reset.

use chrono::{DateTime, Days, Utc};
use std::fmt;

/// Whole hours and minutes until the next UTC midnight, truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetCountdown {
    pub hours: u32,
    pub minutes: u32,
}

impl fmt::Display for ResetCountdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

/// Time remaining until the next UTC midnight after `now`.
///
/// Exactly at midnight the full day remains (`24h 0m`).
pub fn time_until_reset(now: DateTime<Utc>) -> ResetCountdown {
    let next_midnight = now
        .date_naive()
        .checked_add_days(Days::new(1))
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc());

    let remaining_secs = match next_midnight {
        Some(midnight) => (midnight - now).num_seconds().max(0),
        // Only reachable at chrono's maximum date.
        None => 0,
    };

    ResetCountdown {
        hours: (remaining_secs / 3600) as u32,
        minutes: ((remaining_secs % 3600) / 60) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, s)
            .single()
            .expect("valid test timestamp")
    }

    #[test]
    fn test_half_hour_before_midnight() {
        let countdown = time_until_reset(at(23, 30, 0));
        assert_eq!(countdown, ResetCountdown { hours: 0, minutes: 30 });
        assert_eq!(countdown.to_string(), "0h 30m");
    }

    #[test]
    fn test_truncates_seconds() {
        // 10h 15m 59s remain.
        assert_eq!(time_until_reset(at(13, 44, 1)).to_string(), "10h 15m");
    }

    #[test]
    fn test_at_midnight_full_day_remains() {
        assert_eq!(time_until_reset(at(0, 0, 0)).to_string(), "24h 0m");
    }

    #[test]
    fn test_last_second_of_day() {
        assert_eq!(time_until_reset(at(23, 59, 59)).to_string(), "0h 0m");
    }

    proptest! {
        #[test]
        fn prop_countdown_is_within_a_day(secs in 0i64..4_000_000_000) {
            let now = Utc.timestamp_opt(secs, 0).single().expect("in range");
            let countdown = time_until_reset(now);
            prop_assert!(countdown.minutes < 60);
            prop_assert!(countdown.hours * 60 + countdown.minutes <= 24 * 60);
        }
    }
}
