use std::time::Duration;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::geometry::{distance, generate_point, Point};
use crate::mode::{GameMode, ModeSettings, MAX_LIVES, STREAK_FOR_BONUS_LIFE};
use crate::timer::{Countdown, TimerObserver};

/// Two dots and the distance the player has to guess
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Round {
    pub dot1: Point,
    pub dot2: Point,
    pub actual_distance: f64,
}

impl Round {
    /// Draws a round whose dots never coincide; the second dot is redrawn on a tie.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let dot1 = generate_point(rng);
        let mut dot2 = generate_point(rng);
        let mut actual_distance = distance(dot1, dot2);
        while actual_distance == 0.0 {
            warn!("generated zero distance, redrawing second dot");
            dot2 = generate_point(rng);
            actual_distance = distance(dot1, dot2);
        }
        Self {
            dot1,
            dot2,
            actual_distance,
        }
    }
}

/// Result of a single submitted guess, used to build feedback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuessOutcome {
    pub guessed: f64,
    pub actual: f64,
    pub error: f64,
    pub percent_error: f64,
    pub points: u32,
    pub correct: bool,
}

/// One play-through, from mode selection to game over
#[derive(Debug, Clone)]
pub struct Session {
    mode: GameMode,
    lives: u32,
    timer_value: u32,
    timer_duration: Option<u32>,
    round_number: u32,
    round: Round,
    error_history: Vec<f64>,
    running_mean_error: f64,
    total_score: u32,
    consecutive_correct: u32,
    countdown: Countdown,
    rng: StdRng,
}

impl Session {
    pub fn new(mode: GameMode, duration: Option<u32>) -> Self {
        Self::with_rng(mode, duration, StdRng::from_entropy())
    }

    pub fn with_seed(mode: GameMode, duration: Option<u32>, seed: u64) -> Self {
        Self::with_rng(mode, duration, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(mode: GameMode, duration: Option<u32>, mut rng: StdRng) -> Self {
        let settings = mode.settings();
        let timer_duration = settings.timer.map(|t| t.resolve(duration));

        match timer_duration {
            Some(secs) => info!(%mode, secs, "initializing session"),
            None => info!(%mode, lives = settings.initial_lives, "initializing session"),
        }

        let round = Round::generate(&mut rng);

        Self {
            mode,
            lives: settings.initial_lives,
            timer_value: timer_duration.unwrap_or(0),
            timer_duration,
            round_number: 1,
            round,
            error_history: Vec::new(),
            running_mean_error: 0.0,
            total_score: 0,
            consecutive_correct: 0,
            countdown: Countdown::default(),
            rng,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn settings(&self) -> &'static ModeSettings {
        self.mode.settings()
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn timer_value(&self) -> u32 {
        self.timer_value
    }

    /// Duration chosen at start, reused on restart.
    pub fn timer_duration(&self) -> Option<u32> {
        self.timer_duration
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn error_history(&self) -> &[f64] {
        &self.error_history
    }

    pub fn running_mean_error(&self) -> f64 {
        self.running_mean_error
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn consecutive_correct(&self) -> u32 {
        self.consecutive_correct
    }

    pub fn is_timer_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn new_round(&mut self) {
        self.round_number += 1;
        self.round = Round::generate(&mut self.rng);
        debug!(
            round = self.round_number,
            actual = self.round.actual_distance,
            "new round"
        );
    }

    pub fn score(&self, actual: f64, guessed: f64) -> u32 {
        self.settings().scoring.score(actual, guessed)
    }

    pub fn is_correct(&self, actual: f64, guessed: f64) -> bool {
        self.settings().scoring.is_correct(actual, guessed)
    }

    /// Records a guess against the active round. Lives are left to `decrease_life`.
    pub fn record_guess(&mut self, guessed: f64) -> GuessOutcome {
        let actual = self.round.actual_distance;
        let error = (actual - guessed).abs();

        self.error_history.push(error);
        let count = self.error_history.len() as f64;
        self.running_mean_error += (error - self.running_mean_error) / count;

        let scoring = self.settings().scoring;
        let points = scoring.score(actual, guessed);
        let correct = scoring.is_correct(actual, guessed);

        if scoring.accumulates_score() {
            self.total_score += points;
            info!(points, total = self.total_score, "scored round");
        } else if self.settings().has_lives() {
            if correct {
                self.consecutive_correct += 1;
                debug!(streak = self.consecutive_correct, "correct guess");
                if self.consecutive_correct >= STREAK_FOR_BONUS_LIFE {
                    self.increase_life();
                    self.consecutive_correct = 0;
                }
            } else {
                self.consecutive_correct = 0;
                debug!("incorrect guess, streak reset");
            }
        }

        GuessOutcome {
            guessed,
            actual,
            error,
            percent_error: error / actual * 100.0,
            points,
            correct,
        }
    }

    pub fn decrease_life(&mut self) {
        if !self.settings().has_lives() {
            return;
        }
        if self.lives > 0 {
            self.lives -= 1;
            info!(lives = self.lives, "life lost");
        }
    }

    /// Bonus lives only refill up to the starting allotment.
    pub fn increase_life(&mut self) {
        let settings = self.settings();
        if !settings.has_lives() {
            return;
        }
        let cap = settings.initial_lives.min(MAX_LIVES);
        if self.lives < cap {
            self.lives += 1;
            info!(lives = self.lives, "bonus life");
        } else {
            debug!(cap, "bonus life withheld, already at starting lives");
        }
    }

    pub fn check_game_over(&self) -> bool {
        if self.settings().has_timer() {
            self.timer_value == 0
        } else {
            self.lives == 0
        }
    }

    /// Starts the countdown, replacing any run in progress. Returns whether it started.
    pub fn start_timer<O: TimerObserver + ?Sized>(&mut self, observer: &mut O) -> bool {
        self.stop_timer();

        if !self.settings().has_timer() || self.timer_value == 0 {
            warn!(
                mode = %self.mode,
                timer_value = self.timer_value,
                "timer not started"
            );
            return false;
        }

        info!(secs = self.timer_value, "timer started");
        self.countdown.start();
        observer.on_tick(self.timer_value);
        true
    }

    pub fn advance_timer<O: TimerObserver + ?Sized>(&mut self, elapsed: Duration, observer: &mut O) {
        for _ in 0..self.countdown.advance(elapsed) {
            if self.timer_value > 0 {
                self.timer_value -= 1;
                observer.on_tick(self.timer_value);
            }
            if self.timer_value == 0 {
                self.stop_timer();
                info!("time is up");
                observer.on_end();
                break;
            }
        }
    }

    pub fn stop_timer(&mut self) {
        if self.countdown.stop() {
            debug!("timer stopped");
        }
    }
}
