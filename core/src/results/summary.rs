use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::row::ResultStatus;
use super::table::ResultTable;

/// Counts describing a completed run, printed as JSON on request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub event_count: usize,
    pub log_lines: usize,
    pub competitor_count: usize,
    /// Competitors with a recorded finish time
    pub finished: usize,
    pub not_finished: usize,
    pub not_started: usize,
    /// Neither finished nor marked out of the race
    pub without_finish: usize,
    pub elapsed_ms: u64,
}

impl RunSummary {
    pub fn new(
        table: &ResultTable,
        event_count: usize,
        log_lines: usize,
        elapsed: Duration,
    ) -> Self {
        let mut summary = Self {
            event_count,
            log_lines,
            competitor_count: table.len(),
            elapsed_ms: elapsed.as_millis() as u64,
            ..Default::default()
        };

        for status in table.rows().iter().filter_map(|row| row.status) {
            match status {
                ResultStatus::Finished(Some(_)) => summary.finished += 1,
                ResultStatus::Finished(None) => summary.without_finish += 1,
                ResultStatus::NotFinished => summary.not_finished += 1,
                ResultStatus::NotStarted => summary.not_started += 1,
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use biathlon_types::{RaceConfig, RaceTime};

    use super::*;
    use crate::state::RaceCache;

    #[test]
    fn test_counts_by_status() {
        let start = RaceTime::parse_exact("10:00:00.000").unwrap();
        let config = RaceConfig {
            laps: 1,
            lap_len: 1000.0,
            penalty_len: 100.0,
            firing_lines: 1,
            start,
            start_delta: RaceTime::parse("00:00:30").unwrap(),
        };

        let mut cache = RaceCache::new();
        let (state, _) = cache.competitor_mut("1");
        state.start(start);
        state.complete_lap(start.saturating_add(Duration::from_secs(300)), 1);
        cache.competitor_mut("2").0.disqualify();
        cache.competitor_mut("3").0.mark_not_finished("tired");
        cache.competitor_mut("4");

        let table = ResultTable::build(cache, &config);
        let summary = RunSummary::new(&table, 12, 13, Duration::from_millis(7));

        assert_eq!(
            summary,
            RunSummary {
                event_count: 12,
                log_lines: 13,
                competitor_count: 4,
                finished: 1,
                not_finished: 1,
                not_started: 1,
                without_finish: 1,
                elapsed_ms: 7,
            }
        );

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["not_started"], 1);
        assert_eq!(json["elapsed_ms"], 7);
    }
}
