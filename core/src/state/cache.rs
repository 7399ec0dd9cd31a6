use hashbrown::HashMap;

use super::competitor::CompetitorState;
use crate::results::ResultRow;

/// Pure storage for race state.
/// Transition logic lives in EventProcessor.
#[derive(Debug, Clone, Default)]
pub struct RaceCache {
    competitors: HashMap<String, CompetitorState>,
    rows: HashMap<String, ResultRow>,
}

impl RaceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a competitor and their result row, creating both on first sight.
    pub fn competitor_mut(&mut self, id: &str) -> (&mut CompetitorState, &mut ResultRow) {
        let state = self
            .competitors
            .entry(id.to_string())
            .or_insert_with(|| CompetitorState::new(id));
        let row = self
            .rows
            .entry(id.to_string())
            .or_insert_with(|| ResultRow::new(id));
        (state, row)
    }

    // --- Accessors ---

    pub fn competitor(&self, id: &str) -> Option<&CompetitorState> {
        self.competitors.get(id)
    }

    pub fn row(&self, id: &str) -> Option<&ResultRow> {
        self.rows.get(id)
    }

    pub fn competitors(&self) -> impl Iterator<Item = &CompetitorState> {
        self.competitors.values()
    }

    pub fn competitor_count(&self) -> usize {
        self.competitors.len()
    }

    /// Hand the stored state over to result aggregation.
    pub fn into_parts(self) -> (HashMap<String, CompetitorState>, HashMap<String, ResultRow>) {
        (self.competitors, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competitor_created_lazily_once() {
        let mut cache = RaceCache::new();
        assert!(cache.competitor("1").is_none());

        {
            let (state, row) = cache.competitor_mut("1");
            state.record_hit();
            row.hit_stat = "x".to_string();
        }
        {
            let (state, row) = cache.competitor_mut("1");
            assert_eq!(state.total_hits(), 1);
            assert_eq!(row.hit_stat, "x");
        }

        cache.competitor_mut("2");
        assert_eq!(cache.competitor_count(), 2);
        assert_eq!(cache.row("2").map(|r| r.competitor_id.as_str()), Some("2"));
        assert_eq!(cache.competitors().count(), 2);
    }

    #[test]
    fn test_into_parts_keeps_rows_aligned() {
        let mut cache = RaceCache::new();
        cache.competitor_mut("a");
        cache.competitor_mut("b");

        let (competitors, rows) = cache.into_parts();
        assert_eq!(competitors.len(), rows.len());
        for id in competitors.keys() {
            assert!(rows.contains_key(id));
        }
    }
}
