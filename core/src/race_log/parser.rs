//! Telemetry line parsing.
//!
//! A line has the shape `[HH:MM:SS.mmm] <kind> <competitor> [extra...]`.
//! Everything after the competitor id is joined with single spaces and handed
//! to the kind that needs it.

use biathlon_types::RaceTime;
use memchr::memchr;

use super::event::{EventKind, RaceEvent, event_id};
use crate::error::EventParseError;

/// Parse one line. Blank lines yield `Ok(None)`.
pub fn parse_line(line_number: u64, line: &str) -> Result<Option<RaceEvent>, EventParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (remaining, timestamp) = parse_timestamp(line_number, line)?;

    let mut fields = remaining.split_whitespace();
    let (Some(kind_field), Some(competitor_id)) = (fields.next(), fields.next()) else {
        return Err(malformed(line_number, line));
    };
    let extra = fields.collect::<Vec<_>>().join(" ");

    let kind = parse_kind(line_number, kind_field, extra)?;

    Ok(Some(RaceEvent {
        line_number,
        timestamp,
        competitor_id: competitor_id.to_string(),
        kind,
    }))
}

/// Split off the bracketed timestamp, returning the rest of the line.
fn parse_timestamp(line_number: u64, line: &str) -> Result<(&str, RaceTime), EventParseError> {
    let bytes = line.as_bytes();
    if bytes.first() != Some(&b'[') {
        return Err(malformed(line_number, line));
    }
    let close = memchr(b']', bytes).ok_or_else(|| malformed(line_number, line))?;

    let timestamp = RaceTime::parse_exact(&line[1..close])
        .map_err(|source| EventParseError::InvalidTimestamp {
            line: line_number,
            source,
        })?;

    Ok((&line[close + 1..], timestamp))
}

fn parse_kind(line_number: u64, field: &str, extra: String) -> Result<EventKind, EventParseError> {
    let unknown = || EventParseError::UnknownKind {
        line: line_number,
        value: field.to_string(),
    };
    let id = field.parse::<u8>().map_err(|_| unknown())?;

    let kind = match id {
        event_id::REGISTER => EventKind::Register,
        event_id::DRAW_START => {
            let start_time =
                RaceTime::parse(&extra).map_err(|_| EventParseError::InvalidDrawTime {
                    line: line_number,
                    value: extra.clone(),
                })?;
            EventKind::DrawStart { start_time }
        }
        event_id::ON_START_LINE => EventKind::OnStartLine,
        event_id::START => EventKind::Start,
        event_id::ON_RANGE => EventKind::OnRange {
            firing_range: extra,
        },
        event_id::HIT_TARGET => EventKind::HitTarget { target: extra },
        event_id::LEAVE_RANGE => EventKind::LeaveRange,
        event_id::ENTER_PENALTY => EventKind::EnterPenalty,
        event_id::LEAVE_PENALTY => EventKind::LeavePenalty,
        event_id::END_LAP => EventKind::EndLap,
        event_id::NOT_FINISHED => EventKind::NotFinished { comment: extra },
        event_id::DISQUALIFIED => EventKind::Disqualified,
        event_id::FINISHED => EventKind::Finished,
        _ => return Err(unknown()),
    };

    Ok(kind)
}

fn malformed(line_number: u64, line: &str) -> EventParseError {
    EventParseError::MalformedLine {
        line: line_number,
        text: line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> RaceTime {
        RaceTime::parse_exact(s).unwrap()
    }

    #[test]
    fn test_parse_register() {
        let event = parse_line(1, "[09:05:59.867] 1 1").unwrap().unwrap();
        assert_eq!(event.line_number, 1);
        assert_eq!(event.timestamp, time("09:05:59.867"));
        assert_eq!(event.competitor_id, "1");
        assert_eq!(event.kind, EventKind::Register);
    }

    #[test]
    fn test_parse_draw_start() {
        let event = parse_line(2, "[09:15:00.841] 2 1 09:30:00.000")
            .unwrap()
            .unwrap();
        assert_eq!(
            event.kind,
            EventKind::DrawStart {
                start_time: time("09:30:00.000")
            }
        );
    }

    #[test]
    fn test_parse_extra_joins_fields() {
        let event = parse_line(3, "[09:59:03.872] 11 1 Lost   in the forest")
            .unwrap()
            .unwrap();
        assert_eq!(
            event.kind,
            EventKind::NotFinished {
                comment: "Lost in the forest".to_string()
            }
        );
    }

    #[test]
    fn test_parse_range_and_target_payloads() {
        let on_range = parse_line(1, "[09:49:31.659] 5 7 1").unwrap().unwrap();
        assert_eq!(
            on_range.kind,
            EventKind::OnRange {
                firing_range: "1".to_string()
            }
        );

        let hit = parse_line(2, "[09:49:33.123] 6 7 4").unwrap().unwrap();
        assert_eq!(hit.competitor_id, "7");
        assert_eq!(
            hit.kind,
            EventKind::HitTarget {
                target: "4".to_string()
            }
        );
    }

    #[test]
    fn test_parse_outgoing_kinds_accepted() {
        let dq = parse_line(1, "[10:00:00.000] 12 3").unwrap().unwrap();
        assert_eq!(dq.kind, EventKind::Disqualified);
        let fin = parse_line(2, "[10:00:00.000] 13 3").unwrap().unwrap();
        assert_eq!(fin.kind, EventKind::Finished);
    }

    #[test]
    fn test_kind_id_matches_wire_value() {
        let event = parse_line(1, "[10:00:00.000] 9 3").unwrap().unwrap();
        assert_eq!(event.kind.id(), event_id::LEAVE_PENALTY);
    }

    #[test]
    fn test_blank_line_skipped() {
        assert!(parse_line(1, "").unwrap().is_none());
        assert!(parse_line(1, "   \t").unwrap().is_none());
        assert!(parse_line(1, "\r").unwrap().is_none());
    }

    #[test]
    fn test_too_few_fields() {
        let err = parse_line(4, "[09:05:59.867] 1").unwrap_err();
        assert!(matches!(err, EventParseError::MalformedLine { line: 4, .. }));

        let err = parse_line(5, "[09:05:59.867]").unwrap_err();
        assert!(matches!(err, EventParseError::MalformedLine { line: 5, .. }));
    }

    #[test]
    fn test_missing_brackets() {
        let err = parse_line(1, "09:05:59.867 1 1").unwrap_err();
        assert!(matches!(err, EventParseError::MalformedLine { .. }));

        let err = parse_line(1, "[09:05:59.867 1 1").unwrap_err();
        assert!(matches!(err, EventParseError::MalformedLine { .. }));
    }

    #[test]
    fn test_bad_timestamp() {
        let err = parse_line(9, "[9:05:59] 1 1").unwrap_err();
        assert!(matches!(err, EventParseError::InvalidTimestamp { line: 9, .. }));
        assert_eq!(err.line(), Some(9));
    }

    #[test]
    fn test_unknown_kind() {
        for line in ["[10:00:00.000] 0 1", "[10:00:00.000] 14 1", "[10:00:00.000] x 1"] {
            let err = parse_line(1, line).unwrap_err();
            assert!(matches!(err, EventParseError::UnknownKind { .. }), "{line}");
        }
    }

    #[test]
    fn test_draw_start_requires_time() {
        let err = parse_line(1, "[09:15:00.841] 2 1").unwrap_err();
        assert!(matches!(err, EventParseError::InvalidDrawTime { .. }));

        let err = parse_line(1, "[09:15:00.841] 2 1 soon").unwrap_err();
        assert!(matches!(err, EventParseError::InvalidDrawTime { .. }));
    }
}
