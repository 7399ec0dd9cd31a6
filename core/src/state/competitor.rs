use std::time::Duration;

use biathlon_types::RaceTime;
use hashbrown::HashMap;

/// Outcome of a completed main lap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LapCompletion {
    /// Lap number just completed, starting at 1
    pub lap: u32,
    /// Time from the actual start to the end of this lap
    pub elapsed: Duration,
    /// True when this lap was the last one of the race
    pub finished: bool,
}

/// Timing, penalty and shooting progress of one competitor.
///
/// Flags only ever go from false to true, and the lap counter only grows.
#[derive(Debug, Clone, Default)]
pub struct CompetitorState {
    id: String,
    draw_start_time: RaceTime,
    actual_start_time: RaceTime,
    finish_time: Option<RaceTime>,
    penalty_entry_time: RaceTime,
    lap_elapsed_times: Vec<Duration>,
    disqualified: bool,
    not_finished: bool,
    comment: String,
    current_lap_index: u32,
    hits_per_lap: HashMap<u32, u32>,
}

impl CompetitorState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    // --- Transitions ---

    pub fn set_draw_start(&mut self, start_time: RaceTime) {
        self.draw_start_time = start_time;
    }

    /// Latest moment the competitor may start without being disqualified.
    pub fn start_deadline(&self, tolerance: Duration) -> RaceTime {
        self.draw_start_time.saturating_add(tolerance)
    }

    pub fn start(&mut self, at: RaceTime) {
        self.actual_start_time = at;
    }

    pub fn disqualify(&mut self) {
        self.disqualified = true;
    }

    /// Count a hit on the current lap, returning the lap's new hit count.
    pub fn record_hit(&mut self) -> u32 {
        let hits = self.hits_per_lap.entry(self.current_lap_index).or_insert(0);
        *hits += 1;
        *hits
    }

    pub fn enter_penalty(&mut self, at: RaceTime) {
        self.penalty_entry_time = at;
    }

    /// Time spent in the penalty loop that ends at `at`.
    pub fn penalty_elapsed(&self, at: RaceTime) -> Duration {
        at.saturating_since(self.penalty_entry_time)
    }

    /// Close the current lap. Sets the finish time when the last lap ends.
    pub fn complete_lap(&mut self, at: RaceTime, total_laps: u32) -> LapCompletion {
        let elapsed = at.saturating_since(self.actual_start_time);
        self.lap_elapsed_times.push(elapsed);
        self.current_lap_index += 1;

        let finished = self.current_lap_index == total_laps;
        if finished {
            self.finish_time = Some(at);
        }

        LapCompletion {
            lap: self.current_lap_index,
            elapsed,
            finished,
        }
    }

    pub fn mark_not_finished(&mut self, comment: impl Into<String>) {
        self.not_finished = true;
        self.comment = comment.into();
    }

    // --- Accessors ---

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn draw_start_time(&self) -> RaceTime {
        self.draw_start_time
    }

    pub fn actual_start_time(&self) -> RaceTime {
        self.actual_start_time
    }

    pub fn finish_time(&self) -> Option<RaceTime> {
        self.finish_time
    }

    pub fn penalty_entry_time(&self) -> RaceTime {
        self.penalty_entry_time
    }

    pub fn lap_elapsed_times(&self) -> &[Duration] {
        &self.lap_elapsed_times
    }

    pub fn is_disqualified(&self) -> bool {
        self.disqualified
    }

    pub fn is_not_finished(&self) -> bool {
        self.not_finished
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn current_lap_index(&self) -> u32 {
        self.current_lap_index
    }

    pub fn hits_on_lap(&self, lap_index: u32) -> u32 {
        self.hits_per_lap.get(&lap_index).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> u32 {
        self.hits_per_lap.values().sum()
    }
}
