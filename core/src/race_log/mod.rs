mod event;
pub mod parser;
pub mod reader;

pub use event::{EventKind, RaceEvent, event_id};
pub use parser::parse_line;
pub use reader::{parse_events, read_event_file, read_events};
