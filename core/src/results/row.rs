use std::fmt;
use std::time::Duration;

use biathlon_types::RaceTime;
use biathlon_types::formatting::{
    EMPTY_SPLIT, format_hit_ratio, format_race_time, format_speed, format_split,
};

use crate::state::CompetitorState;

/// Final classification of a competitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStatus {
    /// Neither disqualified nor retired. Holds the finish time, `None` if the
    /// last lap was never completed (rendered as midnight).
    Finished(Option<RaceTime>),
    NotFinished,
    NotStarted,
}

impl ResultStatus {
    /// Classify a competitor. Retirement outranks disqualification.
    pub fn of(state: &CompetitorState) -> Self {
        if state.is_not_finished() {
            Self::NotFinished
        } else if state.is_disqualified() {
            Self::NotStarted
        } else {
            Self::Finished(state.finish_time())
        }
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finished(time) => write!(f, "{}", time.unwrap_or_default()),
            Self::NotFinished => f.write_str("[NotFinished]"),
            Self::NotStarted => f.write_str("[NotStarted]"),
        }
    }
}

/// One line of the result table, filled in while events are processed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRow {
    pub competitor_id: String,
    /// Set once by [`ResultRow::finalize`]
    pub status: Option<ResultStatus>,
    pub lap_times: Vec<String>,
    pub lap_speeds: Vec<String>,
    pub penalty_times: Vec<String>,
    pub penalty_speeds: Vec<String>,
    /// Elapsed time of the most recently completed lap. Used for ranking.
    pub total_race_time: Duration,
    pub hit_stat: String,
}

impl ResultRow {
    pub fn new(competitor_id: impl Into<String>) -> Self {
        Self {
            competitor_id: competitor_id.into(),
            ..Default::default()
        }
    }

    pub fn push_lap(&mut self, elapsed: Duration, speed: Option<f64>) {
        self.lap_times.push(format_race_time(elapsed));
        self.lap_speeds.push(format_speed(speed));
        self.total_race_time = elapsed;
    }

    pub fn push_penalty(&mut self, elapsed: Duration, speed: Option<f64>) {
        self.penalty_times.push(format_race_time(elapsed));
        self.penalty_speeds.push(format_speed(speed));
    }

    /// Derive status and hit ratio from the competitor's final state.
    pub fn finalize(&mut self, state: &CompetitorState, possible_hits: u32) {
        self.status = Some(ResultStatus::of(state));
        self.hit_stat = format_hit_ratio(state.total_hits(), possible_hits);
    }

    /// Render as `[status] id [laps] [penalties] hits`.
    ///
    /// Exactly `total_laps` lap entries are written, with `{,}` for laps not
    /// reached. Penalty entries are written only for recorded segments.
    pub fn render(&self, total_laps: u32) -> String {
        let status = self.status.map(|s| s.to_string()).unwrap_or_default();

        let laps = (0..total_laps as usize)
            .map(|i| match (self.lap_times.get(i), self.lap_speeds.get(i)) {
                (Some(time), Some(speed)) => format_split(time, speed),
                _ => EMPTY_SPLIT.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");

        let penalties = self
            .penalty_times
            .iter()
            .zip(&self.penalty_speeds)
            .map(|(time, speed)| format_split(time, speed))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "[{}] {} [{}] [{}] {}",
            status, self.competitor_id, laps, penalties, self.hit_stat
        )
    }
}
