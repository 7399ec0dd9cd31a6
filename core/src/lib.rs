pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod handlers;
pub mod output;
pub mod race_log;
pub mod results;
pub mod state;

// Re-exports for convenience
pub use biathlon_types::{RaceConfig, RaceTime};
pub use config::load_config;
pub use context::{ProcessedRace, RaceSession, process};
pub use error::{ConfigError, EventParseError, OutputError, RaceError};
pub use events::{EventProcessor, RaceSignal, SignalHandler, SignalKind};
pub use output::{Artifact, commit_artifacts};
pub use race_log::{EventKind, RaceEvent};
pub use results::{ResultRow, ResultStatus, ResultTable, RunSummary};
pub use state::RaceCache;
