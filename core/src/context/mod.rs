mod race_session;

pub use race_session::{ProcessedRace, RaceSession, process};
