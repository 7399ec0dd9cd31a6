//! Race parameters shared by the processor and the report binary.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::time::RaceTime;

/// Targets on a firing line. One firing-line visit counts per lap.
pub const TARGETS_PER_LAP: u32 = 5;

/// Parameters of a single race, as stored in `config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceConfig {
    /// Main laps each competitor must complete
    pub laps: u32,
    /// Length of one main lap, in meters
    pub lap_len: f64,
    /// Length of one penalty lap, in meters
    pub penalty_len: f64,
    pub firing_lines: u32,
    /// Scheduled race start
    pub start: RaceTime,
    /// How late a competitor may start after their drawn start time.
    /// Written as a clock value, read as a duration.
    pub start_delta: RaceTime,
}

impl RaceConfig {
    pub fn start_tolerance(&self) -> Duration {
        self.start_delta.as_duration()
    }

    /// Denominator of every competitor's hit ratio.
    pub fn possible_hits(&self) -> u32 {
        self.laps.saturating_mul(TARGETS_PER_LAP)
    }
}
