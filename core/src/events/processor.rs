//! Race state machine.
//!
//! Each event is routed to its competitor's state and result row, then turned
//! into the signals that make up the race log:
//! - Start is checked against the drawn start time plus the tolerance window
//! - EndLap closes a lap and, on the last lap, also finishes the competitor
//! - Once disqualified, a competitor's penalty and lap timing is frozen

use std::time::Duration;

use biathlon_types::RaceConfig;

use super::signal::{RaceSignal, SignalKind};
use crate::race_log::{EventKind, RaceEvent};
use crate::state::RaceCache;

/// Applies race rules to events. Holds no per-competitor state itself.
#[derive(Debug, Clone)]
pub struct EventProcessor {
    config: RaceConfig,
}

impl EventProcessor {
    pub fn new(config: RaceConfig) -> Self {
        Self { config }
    }

    /// Fold one event into the cache and return the resulting signals.
    pub fn process_event(&self, event: &RaceEvent, cache: &mut RaceCache) -> Vec<RaceSignal> {
        let id = event.competitor_id.as_str();
        let timestamp = event.timestamp;
        let signal = |kind| RaceSignal::new(timestamp, id, kind);

        tracing::debug!(
            line = event.line_number,
            competitor = id,
            kind = event.kind.id(),
            "Processing event"
        );

        let (competitor, row) = cache.competitor_mut(id);

        match &event.kind {
            EventKind::Register => vec![signal(SignalKind::Registered)],
            EventKind::DrawStart { start_time } => {
                competitor.set_draw_start(*start_time);
                vec![signal(SignalKind::StartDrawn {
                    start_time: *start_time,
                })]
            }
            EventKind::OnStartLine => vec![signal(SignalKind::OnStartLine)],
            EventKind::Start => {
                let deadline = competitor.start_deadline(self.config.start_tolerance());
                if timestamp > deadline {
                    competitor.disqualify();
                    tracing::info!(competitor = id, %deadline, "Late start, disqualified");
                    vec![signal(SignalKind::Disqualified)]
                } else {
                    // Timing stays frozen once disqualified
                    if !competitor.is_disqualified() {
                        competitor.start(timestamp);
                    }
                    vec![signal(SignalKind::Started)]
                }
            }
            EventKind::OnRange { firing_range } => vec![signal(SignalKind::OnFiringRange {
                firing_range: firing_range.clone(),
            })],
            EventKind::HitTarget { target } => {
                competitor.record_hit();
                vec![signal(SignalKind::TargetHit {
                    target: target.clone(),
                })]
            }
            EventKind::LeaveRange => vec![signal(SignalKind::LeftFiringRange)],
            EventKind::EnterPenalty => {
                if !competitor.is_disqualified() {
                    competitor.enter_penalty(timestamp);
                }
                vec![signal(SignalKind::EnteredPenalty)]
            }
            EventKind::LeavePenalty => {
                if !competitor.is_disqualified() {
                    let elapsed = competitor.penalty_elapsed(timestamp);
                    let speed = speed(self.config.penalty_len, elapsed);
                    if speed.is_none() {
                        tracing::warn!(
                            competitor = id,
                            "Zero-length penalty interval, speed unavailable"
                        );
                    }
                    row.push_penalty(elapsed, speed);
                }
                vec![signal(SignalKind::LeftPenalty)]
            }
            EventKind::EndLap => {
                let mut signals = vec![signal(SignalKind::LapEnded)];
                if competitor.is_disqualified() {
                    return signals;
                }

                let lap = competitor.complete_lap(timestamp, self.config.laps);
                let speed = speed(self.config.lap_len, lap.elapsed);
                if speed.is_none() {
                    tracing::warn!(
                        competitor = id,
                        lap = lap.lap,
                        "Zero-length lap, speed unavailable"
                    );
                }
                row.push_lap(lap.elapsed, speed);

                if lap.finished {
                    signals.push(signal(SignalKind::Finished));
                }
                signals
            }
            EventKind::NotFinished { comment } => {
                competitor.mark_not_finished(comment.as_str());
                vec![signal(SignalKind::CannotContinue {
                    comment: comment.clone(),
                })]
            }
            EventKind::Disqualified | EventKind::Finished => {
                // Derived by the processor, never taken from input
                tracing::warn!(
                    line = event.line_number,
                    competitor = id,
                    kind = event.kind.id(),
                    "Ignoring incoming outcome event"
                );
                Vec::new()
            }
        }
    }
}

/// Distance per elapsed second, or `None` for a zero-length interval.
fn speed(distance: f64, elapsed: Duration) -> Option<f64> {
    let secs = elapsed.as_secs_f64();
    (secs > 0.0).then(|| distance / secs)
}
