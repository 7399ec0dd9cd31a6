pub mod config;
pub mod formatting;
pub mod time;

pub use config::RaceConfig;
pub use time::{RaceTime, TimeParseError};
