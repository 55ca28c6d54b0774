//! Cancel-and-reschedule debouncing for keystrokes.

use clockface_core::Command;
use std::time::Duration;

/// Default pause after the last keystroke before a field is acted on.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(400);

/// One pending timer at a time, replaced on every keystroke.
///
/// Timers cannot be cancelled once handed to the runtime, so each schedule
/// bumps a generation number and carries it in the timer's message. When the
/// message comes back, [`settle`](Debouncer::settle) accepts only the newest
/// generation; every earlier timer is stale and ignored.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Latest generation handed out.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Supersede any pending timer and start a new one.
    pub fn schedule<Msg: Send + 'static>(
        &mut self,
        map: impl FnOnce(u64) -> Msg + Send + 'static,
    ) -> Command<Msg> {
        self.generation += 1;
        let generation = self.generation;
        Command::tick(self.delay, move |_| map(generation))
    }

    /// Whether a timer message with `generation` is the most recent one.
    pub fn settle(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}
