//! Duration and timestamp formatting.

use chrono::{DateTime, TimeZone, Utc};

const HOUR_MS: u64 = 3_600_000;
const MINUTE_MS: u64 = 60_000;
const SECOND_MS: u64 = 1_000;

/// `HH:MM:SS`, zero-padded. Hours are not wrapped at 24.
pub fn format_compact(ms: u64) -> String {
    let hours = ms / HOUR_MS;
    let minutes = (ms % HOUR_MS) / MINUTE_MS;
    let seconds = (ms % MINUTE_MS) / SECOND_MS;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Hour/minute phrase such as `2h 15min`. A zero hour count is dropped, so
/// anything under an hour reads `15min` and anything under a minute `0min`.
pub fn format_verbose(ms: u64) -> String {
    let hours = ms / HOUR_MS;
    let minutes = (ms % HOUR_MS) / MINUTE_MS;
    if hours > 0 {
        format!("{hours}h {minutes}min")
    } else {
        format!("{minutes}min")
    }
}

/// `HH:MM` wall time of an epoch-ms timestamp in the given timezone.
pub fn format_clock_time<Tz: TimeZone>(epoch_ms: u64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let utc = i64::try_from(epoch_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis);
    match utc {
        Some(utc) => utc.with_timezone(tz).format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn compact_zero() {
        assert_eq!(format_compact(0), "00:00:00");
    }

    #[test]
    fn compact_mixed_units() {
        assert_eq!(format_compact(3_661_000), "01:01:01");
    }

    #[test]
    fn compact_does_not_wrap_past_a_day() {
        assert_eq!(format_compact(90_000_000), "25:00:00");
        assert_eq!(format_compact(360_000_000), "100:00:00");
    }

    #[test]
    fn compact_truncates_sub_second() {
        assert_eq!(format_compact(1_999), "00:00:01");
    }

    #[test]
    fn verbose_drops_zero_hours() {
        assert_eq!(format_verbose(15 * MINUTE_MS), "15min");
        assert_eq!(format_verbose(30 * SECOND_MS), "0min");
    }

    #[test]
    fn verbose_with_hours() {
        assert_eq!(format_verbose(2 * HOUR_MS + 15 * MINUTE_MS), "2h 15min");
        assert_eq!(format_verbose(3 * HOUR_MS), "3h 0min");
    }

    #[test]
    fn clock_time_respects_offset() {
        // 2024-01-01T10:30:00Z
        let ts = 1_704_105_000_000;
        assert_eq!(format_clock_time(ts, &Utc), "10:30");
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(format_clock_time(ts, &brt), "07:30");
    }

    #[test]
    fn clock_time_out_of_range_is_placeholder() {
        assert_eq!(format_clock_time(u64::MAX, &Utc), "--:--");
    }
}
