use biathlon_types::RaceConfig;

use crate::events::{EventProcessor, RaceSignal, SignalHandler};
use crate::handlers::EventLog;
use crate::race_log::RaceEvent;
use crate::results::ResultTable;
use crate::state::RaceCache;

/// Drives one race: folds events through the processor and fans the
/// resulting signals out to the race log and any registered handlers.
pub struct RaceSession {
    processor: EventProcessor,
    cache: RaceCache,
    log: EventLog,
    signal_handlers: Vec<Box<dyn SignalHandler + Send + Sync>>,
    event_count: usize,
}

/// Everything a finished fold produced.
#[derive(Debug, Clone)]
pub struct ProcessedRace {
    pub log_text: String,
    pub log_lines: usize,
    pub event_count: usize,
    pub cache: RaceCache,
}

impl ProcessedRace {
    /// Rank the folded competitors into the result table.
    pub fn result_table(&self, config: &RaceConfig) -> ResultTable {
        ResultTable::build(self.cache.clone(), config)
    }
}

impl RaceSession {
    pub fn new(config: RaceConfig) -> Self {
        Self {
            processor: EventProcessor::new(config),
            cache: RaceCache::new(),
            log: EventLog::new(),
            signal_handlers: Vec::new(),
            event_count: 0,
        }
    }

    /// Register a signal handler to receive race signals
    pub fn add_signal_handler(&mut self, handler: Box<dyn SignalHandler + Send + Sync>) {
        self.signal_handlers.push(handler);
    }

    /// Process a single event and dispatch its signals
    pub fn process_event(&mut self, event: &RaceEvent) {
        let signals = self.processor.process_event(event, &mut self.cache);
        self.event_count += 1;
        self.dispatch_signals(&signals);
    }

    /// Process events in order
    pub fn process_events(&mut self, events: &[RaceEvent]) {
        let mut all_signals = Vec::new();
        for event in events {
            all_signals.extend(self.processor.process_event(event, &mut self.cache));
        }
        self.event_count += events.len();
        self.dispatch_signals(&all_signals);
    }

    pub fn cache(&self) -> &RaceCache {
        &self.cache
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn finish(self) -> ProcessedRace {
        tracing::debug!(
            events = self.event_count,
            competitors = self.cache.competitor_count(),
            "Race fold complete"
        );
        ProcessedRace {
            log_lines: self.log.line_count(),
            log_text: self.log.into_text(),
            event_count: self.event_count,
            cache: self.cache,
        }
    }

    fn dispatch_signals(&mut self, signals: &[RaceSignal]) {
        self.log.handle_signals(signals);
        for handler in &mut self.signal_handlers {
            handler.handle_signals(signals);
        }
    }
}

/// Fold an ordered event sequence into the race log and per-competitor state.
pub fn process(events: &[RaceEvent], config: &RaceConfig) -> ProcessedRace {
    let mut session = RaceSession::new(config.clone());
    session.process_events(events);
    session.finish()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::events::SignalKind;
    use crate::race_log::parse_events;

    const CONFIG: &str = include_str!("../../../data/sunny_5_skiers/config.json");
    const EVENTS: &str = include_str!("../../../data/sunny_5_skiers/events");

    const EXPECTED_LOG: &str = "\
[09:05:59.867] The competitor(1) registered
[09:15:00.841] The start time for the competitor(1) was set by a draw to 09:30:00.000
[09:29:45.734] The competitor(1) is on the start line
[09:30:01.005] The competitor(1) has started
[09:49:31.659] The competitor(1) is on the firing range(1)
[09:49:33.123] The target(1) has been hit by competitor(1)
[09:49:34.650] The target(2) has been hit by competitor(1)
[09:49:35.937] The target(4) has been hit by competitor(1)
[09:49:37.364] The target(5) has been hit by competitor(1)
[09:49:38.339] The competitor(1) left the firing range
[09:49:55.915] The competitor(1) entered the penalty laps
[09:51:48.391] The competitor(1) left the penalty laps
[09:59:03.872] The competitor(1) ended the main lap
[09:59:03.872] The competitor(1) can't continue: Lost in the forest
";

    fn config() -> RaceConfig {
        serde_json::from_str(CONFIG).unwrap()
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<SignalKind>>>);

    impl SignalHandler for Recorder {
        fn handle_signal(&mut self, signal: &RaceSignal) {
            self.0.lock().unwrap().push(signal.kind.clone());
        }
    }

    #[test]
    fn test_sample_race_log_and_result() {
        let config = config();
        let events = parse_events(EVENTS).unwrap();
        let race = process(&events, &config);

        assert_eq!(race.event_count, 14);
        assert_eq!(race.log_lines, 14);
        assert_eq!(race.log_text, EXPECTED_LOG);

        let table = race.result_table(&config);
        assert_eq!(
            table.render(),
            "[[NotFinished]] 1 [{00:29:02.867, 2.095}, {,}] [{00:01:52.476, 0.445}] 4/10\n"
        );
    }

    #[test]
    fn test_handlers_see_every_signal() {
        let recorder = Recorder::default();
        let mut session = RaceSession::new(config());
        session.add_signal_handler(Box::new(recorder.clone()));

        for event in parse_events(EVENTS).unwrap() {
            session.process_event(&event);
        }

        assert_eq!(session.log().line_count(), 14);
        assert_eq!(recorder.0.lock().unwrap().len(), 14);
        assert!(session.cache().competitor("1").unwrap().is_not_finished());
    }

    #[test]
    fn test_finish_line_follows_last_lap() {
        let events = parse_events(
            "[09:05:00.000] 2 7 09:10:00.000\n\
             [09:10:05.000] 4 7\n\
             [09:20:05.000] 10 7\n\
             [09:30:05.000] 10 7\n",
        )
        .unwrap();
        let race = process(&events, &config());

        let lines = race.log_text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[4], "[09:30:05.000] The competitor(7) has finished");
        assert_eq!(race.event_count, 4);
        assert_eq!(
            race.cache.competitor("7").and_then(|c| c.finish_time()),
            Some(biathlon_types::RaceTime::parse_exact("09:30:05.000").unwrap())
        );
    }

    #[test]
    fn test_empty_event_stream() {
        let race = process(&[], &config());
        assert_eq!(race.log_text, "");
        assert_eq!(race.event_count, 0);
        assert!(race.result_table(&config()).is_empty());
    }
}
