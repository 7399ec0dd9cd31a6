use biathlon_types::RaceTime;

/// Numeric event kinds as written in race telemetry lines.
pub mod event_id {
    pub const REGISTER: u8 = 1;
    pub const DRAW_START: u8 = 2;
    pub const ON_START_LINE: u8 = 3;
    pub const START: u8 = 4;
    pub const ON_RANGE: u8 = 5;
    pub const HIT_TARGET: u8 = 6;
    pub const LEAVE_RANGE: u8 = 7;
    pub const ENTER_PENALTY: u8 = 8;
    pub const LEAVE_PENALTY: u8 = 9;
    pub const END_LAP: u8 = 10;
    pub const NOT_FINISHED: u8 = 11;
    pub const DISQUALIFIED: u8 = 12;
    pub const FINISHED: u8 = 13;
}

/// What happened to a competitor. Kinds that carry a payload keep it here
/// instead of in a loose string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Register,
    DrawStart { start_time: RaceTime },
    OnStartLine,
    Start,
    OnRange { firing_range: String },
    HitTarget { target: String },
    LeaveRange,
    EnterPenalty,
    LeavePenalty,
    EndLap,
    NotFinished { comment: String },
    /// Outgoing kind only. Never changes competitor state when received.
    Disqualified,
    /// Outgoing kind only. Never changes competitor state when received.
    Finished,
}

impl EventKind {
    pub fn id(&self) -> u8 {
        match self {
            Self::Register => event_id::REGISTER,
            Self::DrawStart { .. } => event_id::DRAW_START,
            Self::OnStartLine => event_id::ON_START_LINE,
            Self::Start => event_id::START,
            Self::OnRange { .. } => event_id::ON_RANGE,
            Self::HitTarget { .. } => event_id::HIT_TARGET,
            Self::LeaveRange => event_id::LEAVE_RANGE,
            Self::EnterPenalty => event_id::ENTER_PENALTY,
            Self::LeavePenalty => event_id::LEAVE_PENALTY,
            Self::EndLap => event_id::END_LAP,
            Self::NotFinished { .. } => event_id::NOT_FINISHED,
            Self::Disqualified => event_id::DISQUALIFIED,
            Self::Finished => event_id::FINISHED,
        }
    }
}

/// One parsed telemetry line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceEvent {
    pub line_number: u64,
    pub timestamp: RaceTime,
    pub competitor_id: String,
    pub kind: EventKind,
}

impl RaceEvent {
    pub fn new(timestamp: RaceTime, competitor_id: impl Into<String>, kind: EventKind) -> Self {
        Self {
            line_number: 0,
            timestamp,
            competitor_id: competitor_id.into(),
            kind,
        }
    }
}
