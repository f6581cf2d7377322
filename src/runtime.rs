use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};
use tracing::debug;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize,
    /// Wall time since the previous step.
    Tick(Duration),
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait GameEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<GameEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                // Windows reports releases too
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    tx.send(GameEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => tx.send(GameEvent::Resize),
                Ok(_) => Ok(()),
                Err(e) => {
                    debug!(error = %e, "terminal event reader stopped");
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<GameEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }
}

impl GameEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: GameEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    last_tick: Instant,
}

impl<E: GameEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
            last_tick: Instant::now(),
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout.
    ///
    /// Timeout ticks carry the time measured since the previous tick, so a
    /// countdown driven by them keeps wall-clock pace even when key events
    /// interleave. Ticks injected by the source pass through as they are.
    pub fn step(&mut self) -> GameEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(GameEvent::Tick(elapsed)) => {
                self.last_tick = Instant::now();
                GameEvent::Tick(elapsed)
            }
            Ok(ev) => ev,
            Err(_) => {
                let now = Instant::now();
                let elapsed = now.duration_since(self.last_tick);
                self.last_tick = now;
                GameEvent::Tick(elapsed)
            }
        }
    }

    /// Restart elapsed-time measurement, e.g. when a countdown begins.
    pub fn reset_clock(&mut self) {
        self.last_tick = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(5));
        let mut runner = Runner::new(es, ticker);

        match runner.step() {
            GameEvent::Tick(elapsed) => assert!(elapsed >= Duration::from_millis(5)),
            _ => panic!("expected Tick on timeout"),
        }
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(GameEvent::Resize).unwrap();
        tx.send(GameEvent::Key(KeyEvent::new(
            KeyCode::Enter,
            KeyModifiers::NONE,
        )))
        .unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(10));
        let mut runner = Runner::new(es, ticker);

        assert!(matches!(runner.step(), GameEvent::Resize));
        assert!(matches!(runner.step(), GameEvent::Key(k) if k.code == KeyCode::Enter));
    }

    #[test]
    fn injected_ticks_pass_through() {
        let (tx, rx) = mpsc::channel();
        tx.send(GameEvent::Tick(Duration::from_secs(3))).unwrap();
        let es = TestEventSource::new(rx);
        let mut runner = Runner::new(es, FixedTicker::new(Duration::from_millis(10)));

        assert!(matches!(runner.step(), GameEvent::Tick(d) if d == Duration::from_secs(3)));
    }

    #[test]
    fn tick_elapsed_accumulates_across_key_events() {
        let (tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(20));
        let mut runner = Runner::new(es, ticker);

        std::thread::sleep(Duration::from_millis(30));
        tx.send(GameEvent::Resize).unwrap();
        assert!(matches!(runner.step(), GameEvent::Resize));

        match runner.step() {
            GameEvent::Tick(elapsed) => assert!(elapsed >= Duration::from_millis(50)),
            _ => panic!("expected Tick"),
        }
    }
}
