mod cache;
mod competitor;

pub use cache::RaceCache;
pub use competitor::{CompetitorState, LapCompletion};
