use biathlon_types::RaceConfig;

use super::row::ResultRow;
use crate::state::RaceCache;

/// Ranked result rows, built once after every event has been folded.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
    total_laps: u32,
}

impl ResultTable {
    /// Finalize every competitor's row and rank them.
    ///
    /// Rows are ordered by the elapsed time of the last completed lap,
    /// regardless of status, with the competitor id breaking ties.
    pub fn build(cache: RaceCache, config: &RaceConfig) -> Self {
        let possible_hits = config.possible_hits();
        let (competitors, mut pending) = cache.into_parts();

        let mut rows = competitors
            .values()
            .filter_map(|state| {
                let mut row = pending.remove(state.id())?;
                row.finalize(state, possible_hits);
                Some(row)
            })
            .collect::<Vec<_>>();

        rows.sort_by(|a, b| {
            a.total_race_time
                .cmp(&b.total_race_time)
                .then_with(|| a.competitor_id.cmp(&b.competitor_id))
        });

        Self {
            rows,
            total_laps: config.laps,
        }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|row| row.render(self.total_laps))
    }

    /// The result artifact, one newline-terminated line per competitor.
    pub fn render(&self) -> String {
        self.lines().fold(String::new(), |mut out, line| {
            out.push_str(&line);
            out.push('\n');
            out
        })
    }
}
