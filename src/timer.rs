use std::time::Duration;

/// Receives countdown notifications.
pub trait TimerObserver {
    /// Called with the seconds remaining, once at start and after every decrement.
    fn on_tick(&mut self, remaining: u32);
    /// Called exactly once when the countdown reaches zero.
    fn on_end(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick(u32),
    End,
}

/// Collects notifications so the caller can act on them after the session borrow ends.
impl TimerObserver for Vec<TimerEvent> {
    fn on_tick(&mut self, remaining: u32) {
        self.push(TimerEvent::Tick(remaining));
    }

    fn on_end(&mut self) {
        self.push(TimerEvent::End);
    }
}

/// Turns irregular wall-clock ticks into whole-second steps.
///
/// Stopping is synchronous and idempotent; a stopped countdown ignores
/// elapsed time until it is started again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Countdown {
    running: bool,
    carry: Duration,
}

impl Countdown {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
        self.carry = Duration::ZERO;
    }

    /// Returns whether it was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        self.carry = Duration::ZERO;
        was_running
    }

    /// Number of whole seconds completed by this slice of wall time.
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        if !self.running {
            return 0;
        }
        self.carry = self.carry.saturating_add(elapsed);
        let whole = self.carry.as_secs();
        self.carry -= Duration::from_secs(whole);
        whole
    }
}
