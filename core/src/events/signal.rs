use std::fmt;

use biathlon_types::RaceTime;

/// Signals emitted by the EventProcessor, one per race log line.
/// These are what happened to a competitor after the race rules were applied,
/// which is not always what the raw event said (a late start becomes a
/// disqualification, the last lap adds a finish).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceSignal {
    pub timestamp: RaceTime,
    pub competitor_id: String,
    pub kind: SignalKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalKind {
    // Pre-race
    Registered,
    StartDrawn { start_time: RaceTime },
    OnStartLine,

    // Start outcome
    Started,
    Disqualified,

    // Shooting
    OnFiringRange { firing_range: String },
    TargetHit { target: String },
    LeftFiringRange,

    // Penalty loop
    EnteredPenalty,
    LeftPenalty,

    // Laps
    LapEnded,
    Finished,

    CannotContinue { comment: String },
}

impl RaceSignal {
    pub fn new(timestamp: RaceTime, competitor_id: impl Into<String>, kind: SignalKind) -> Self {
        Self {
            timestamp,
            competitor_id: competitor_id.into(),
            kind,
        }
    }
}

/// Renders the race log line, `[HH:MM:SS.mmm] message`.
impl fmt::Display for RaceSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = &self.competitor_id;
        write!(f, "[{}] ", self.timestamp)?;
        match &self.kind {
            SignalKind::Registered => write!(f, "The competitor({id}) registered"),
            SignalKind::StartDrawn { start_time } => write!(
                f,
                "The start time for the competitor({id}) was set by a draw to {start_time}"
            ),
            SignalKind::OnStartLine => write!(f, "The competitor({id}) is on the start line"),
            SignalKind::Started => write!(f, "The competitor({id}) has started"),
            SignalKind::Disqualified => write!(f, "The competitor({id}) is disqualified"),
            SignalKind::OnFiringRange { firing_range } => write!(
                f,
                "The competitor({id}) is on the firing range({firing_range})"
            ),
            SignalKind::TargetHit { target } => write!(
                f,
                "The target({target}) has been hit by competitor({id})"
            ),
            SignalKind::LeftFiringRange => write!(f, "The competitor({id}) left the firing range"),
            SignalKind::EnteredPenalty => {
                write!(f, "The competitor({id}) entered the penalty laps")
            }
            SignalKind::LeftPenalty => write!(f, "The competitor({id}) left the penalty laps"),
            SignalKind::LapEnded => write!(f, "The competitor({id}) ended the main lap"),
            SignalKind::Finished => write!(f, "The competitor({id}) has finished"),
            SignalKind::CannotContinue { comment } => {
                write!(f, "The competitor({id}) can't continue: {comment}")
            }
        }
    }
}
