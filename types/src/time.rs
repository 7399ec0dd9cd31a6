//! Time-of-day values for race timing.
//!
//! Every timestamp in a race log is a wall-clock time without a date. Values
//! are kept as milliseconds since midnight from the moment they are parsed, so
//! arithmetic is plain integer math and never depends on a calendar.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::formatting::format_race_time;

const MS_PER_SECOND: u32 = 1_000;
const MS_PER_MINUTE: u32 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u32 = 60 * MS_PER_MINUTE;

/// A time of day with millisecond precision.
///
/// The default value is midnight, which doubles as "not yet assigned" for
/// competitor timing fields.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct RaceTime(u32);

impl RaceTime {
    pub const MIDNIGHT: RaceTime = RaceTime(0);

    pub const fn from_millis(millis: u32) -> Self {
        Self(millis)
    }

    /// Build a time from its clock components, rejecting out-of-range values.
    pub fn from_hms_milli(hour: u32, minute: u32, second: u32, millis: u32) -> Option<Self> {
        if hour >= 24 || minute >= 60 || second >= 60 || millis >= MS_PER_SECOND {
            return None;
        }
        Some(Self(
            hour * MS_PER_HOUR + minute * MS_PER_MINUTE + second * MS_PER_SECOND + millis,
        ))
    }

    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// Offset from midnight.
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(u64::from(self.0))
    }

    /// Elapsed time from `earlier` to `self`. Zero when `earlier` is not before `self`.
    pub fn saturating_since(self, earlier: RaceTime) -> Duration {
        Duration::from_millis(u64::from(self.0.saturating_sub(earlier.0)))
    }

    /// Move this time forward by `delta`. The result is not wrapped at midnight.
    pub fn saturating_add(self, delta: Duration) -> RaceTime {
        let delta_ms = u32::try_from(delta.as_millis()).unwrap_or(u32::MAX);
        RaceTime(self.0.saturating_add(delta_ms))
    }

    /// Parse a strict `HH:MM:SS.mmm` timestamp as written in event lines.
    pub fn parse_exact(input: &str) -> Result<Self, TimeParseError> {
        let b = input.as_bytes();
        if b.len() != 12 || b[8] != b'.' {
            return Err(TimeParseError::new(input, "HH:MM:SS.mmm"));
        }
        parse_clock(b).ok_or_else(|| TimeParseError::new(input, "HH:MM:SS.mmm"))
    }

    /// Parse `HH:MM:SS` or `HH:MM:SS.mmm`, as used by race configuration.
    pub fn parse(input: &str) -> Result<Self, TimeParseError> {
        let b = input.as_bytes();
        let valid_shape = b.len() == 8 || (b.len() == 12 && b[8] == b'.');
        if !valid_shape {
            return Err(TimeParseError::new(input, "HH:MM:SS[.mmm]"));
        }
        parse_clock(b).ok_or_else(|| TimeParseError::new(input, "HH:MM:SS[.mmm]"))
    }
}

/// Parse the clock portion of an already length-checked input.
fn parse_clock(b: &[u8]) -> Option<RaceTime> {
    if b[2] != b':' || b[5] != b':' {
        return None;
    }
    let hour = two_digits(b[0], b[1])?;
    let minute = two_digits(b[3], b[4])?;
    let second = two_digits(b[6], b[7])?;
    let millis = if b.len() == 12 {
        digit(b[9])? * 100 + digit(b[10])? * 10 + digit(b[11])?
    } else {
        0
    };
    RaceTime::from_hms_milli(hour, minute, second, millis)
}

#[inline]
fn digit(c: u8) -> Option<u32> {
    c.is_ascii_digit().then(|| u32::from(c - b'0'))
}

#[inline]
fn two_digits(hi: u8, lo: u8) -> Option<u32> {
    Some(digit(hi)? * 10 + digit(lo)?)
}

impl fmt::Display for RaceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_race_time(self.as_duration()))
    }
}

impl TryFrom<String> for RaceTime {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RaceTime::parse(&value)
    }
}

impl From<RaceTime> for String {
    fn from(value: RaceTime) -> Self {
        value.to_string()
    }
}

/// A time string that does not match the expected clock layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeParseError {
    input: String,
    expected: &'static str,
}

impl TimeParseError {
    fn new(input: &str, expected: &'static str) -> Self {
        Self {
            input: input.to_string(),
            expected,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for TimeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid time {:?}, expected {}", self.input, self.expected)
    }
}

impl std::error::Error for TimeParseError {}
