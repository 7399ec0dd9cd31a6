use std::fs::File;
use std::io::Read;
use std::path::Path;

use memchr::memchr_iter;
use memmap2::Mmap;
use rayon::prelude::*;

use super::event::RaceEvent;
use super::parser::parse_line;
use crate::error::EventParseError;

/// Memory-map an event file and parse every line.
pub fn read_event_file<P: AsRef<Path>>(path: P) -> Result<Vec<RaceEvent>, EventParseError> {
    let path = path.as_ref();
    let read_error = |source| EventParseError::Read {
        origin: path.display().to_string(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    let mmap = unsafe { Mmap::map(&file).map_err(read_error)? };
    let text = std::str::from_utf8(mmap.as_ref())?;

    parse_events(text)
}

/// Read an event stream to its end (e.g. stdin) and parse every line.
pub fn read_events<R: Read>(mut reader: R) -> Result<Vec<RaceEvent>, EventParseError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| EventParseError::Read {
            origin: "<stdin>".to_string(),
            source,
        })?;
    let text = std::str::from_utf8(&bytes)?;

    parse_events(text)
}

/// Parse a whole event log, preserving line order.
///
/// Lines are parsed in parallel. If several lines are malformed the error for
/// the earliest one is returned.
pub fn parse_events(text: &str) -> Result<Vec<RaceEvent>, EventParseError> {
    let bytes = text.as_bytes();

    // (line number, start, end) for every line, blank ones included
    let mut line_ranges: Vec<(u64, usize, usize)> = Vec::new();
    let mut start = 0;
    for end in memchr_iter(b'\n', bytes) {
        line_ranges.push((line_ranges.len() as u64 + 1, start, end));
        start = end + 1;
    }
    if start < bytes.len() {
        line_ranges.push((line_ranges.len() as u64 + 1, start, bytes.len()));
    }

    let parsed: Vec<Result<Option<RaceEvent>, EventParseError>> = line_ranges
        .par_iter()
        .map(|&(line_number, start, end)| parse_line(line_number, &text[start..end]))
        .collect();

    let mut events = Vec::with_capacity(parsed.len());
    for result in parsed {
        if let Some(event) = result? {
            events.push(event);
        }
    }

    tracing::debug!(
        lines = line_ranges.len(),
        events = events.len(),
        "Parsed event log"
    );
    Ok(events)
}
