use super::RaceSignal;

/// Receives race signals as the processor emits them.
pub trait SignalHandler {
    fn handle_signal(&mut self, signal: &RaceSignal);

    fn handle_signals(&mut self, signals: &[RaceSignal]) {
        for signal in signals {
            self.handle_signal(signal);
        }
    }
}
