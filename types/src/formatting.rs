//! Centralized formatting for race log and result output.
//!
//! Every time, speed and split rendered in the log or the result table goes
//! through this module so both artifacts share one fixed-width layout.

use std::time::Duration;

const MS_PER_SECOND: u128 = 1_000;
const MS_PER_MINUTE: u128 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u128 = 60 * MS_PER_MINUTE;

/// Rendered in place of a speed whose interval had zero length.
pub const SPEED_UNAVAILABLE: &str = "n/a";

/// Placeholder for a lap that was never completed.
pub const EMPTY_SPLIT: &str = "{,}";

/// Format a duration as `HH:MM:SS.mmm`.
///
/// Sub-millisecond precision is truncated, never rounded. Hours are padded to
/// two digits and keep growing past 99.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use biathlon_types::formatting::format_race_time;
/// assert_eq!(format_race_time(Duration::from_millis(65_000)), "00:01:05.000");
/// assert_eq!(format_race_time(Duration::from_micros(1_999)), "00:00:00.001");
/// assert_eq!(format_race_time(Duration::from_secs(100 * 3600)), "100:00:00.000");
/// ```
pub fn format_race_time(d: Duration) -> String {
    let total_ms = d.as_millis();

    let h = total_ms / MS_PER_HOUR;
    let m = (total_ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let s = (total_ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let ms = total_ms % MS_PER_SECOND;

    format!("{:02}:{:02}:{:02}.{:03}", h, m, s, ms)
}

/// Format a speed with exactly three decimal places.
///
/// # Examples
/// ```
/// use biathlon_types::formatting::format_speed;
/// assert_eq!(format_speed(Some(2.5)), "2.500");
/// assert_eq!(format_speed(Some(1.0 / 3.0)), "0.333");
/// assert_eq!(format_speed(None), "n/a");
/// ```
pub fn format_speed(speed: Option<f64>) -> String {
    match speed {
        Some(v) => format!("{:.3}", v),
        None => SPEED_UNAVAILABLE.to_string(),
    }
}

/// Format one `{time, speed}` split of the result table.
///
/// # Examples
/// ```
/// use biathlon_types::formatting::format_split;
/// assert_eq!(format_split("00:01:00.000", "50.000"), "{00:01:00.000, 50.000}");
/// ```
pub fn format_split(time: &str, speed: &str) -> String {
    format!("{{{}, {}}}", time, speed)
}

/// Format a hit ratio as `hits/possible`.
///
/// # Examples
/// ```
/// use biathlon_types::formatting::format_hit_ratio;
/// assert_eq!(format_hit_ratio(4, 10), "4/10");
/// ```
pub fn format_hit_ratio(hits: u32, possible: u32) -> String {
    format!("{}/{}", hits, possible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_race_time() {
        assert_eq!(format_race_time(Duration::ZERO), "00:00:00.000");
        assert_eq!(format_race_time(Duration::from_millis(999)), "00:00:00.999");
        assert_eq!(format_race_time(Duration::from_millis(60_000)), "00:01:00.000");
        assert_eq!(
            format_race_time(Duration::from_millis(3_600_000 + 61_001)),
            "01:01:01.001"
        );
    }

    #[test]
    fn test_format_race_time_truncates() {
        assert_eq!(format_race_time(Duration::from_nanos(1_999_999)), "00:00:00.001");
        assert_eq!(
            format_race_time(Duration::from_nanos(59_999_999_999)),
            "00:00:59.999"
        );
    }

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(Some(0.0)), "0.000");
        assert_eq!(format_speed(Some(4.6666)), "4.667");
        assert_eq!(format_speed(Some(10.0)), "10.000");
        assert_eq!(format_speed(None), SPEED_UNAVAILABLE);
    }

    #[test]
    fn test_format_split() {
        assert_eq!(format_split("00:00:30.500", "3.279"), "{00:00:30.500, 3.279}");
        assert_eq!(EMPTY_SPLIT, "{,}");
    }

    #[test]
    fn test_format_hit_ratio() {
        assert_eq!(format_hit_ratio(0, 5), "0/5");
        assert_eq!(format_hit_ratio(12, 10), "12/10");
    }
}
