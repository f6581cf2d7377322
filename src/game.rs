use std::time::Duration;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::error::{parse_guess, GuessError};
use crate::mode::GameMode;
use crate::session::{GuessOutcome, Session};
use crate::state::{GameState, StateHost, StateMachine};
use crate::stats::ErrorSummary;
use crate::timer::TimerEvent;

/// Everything the controller asks of the presentation layer.
pub trait GameHost: StateHost {
    /// Reveal the segment between the dots after a guess.
    fn draw_distance_line(&mut self, correct: bool);
    fn on_timer_tick(&mut self, _remaining: u32) {}
}

/// What the player is told after submitting a guess
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feedback {
    pub outcome: GuessOutcome,
    pub awards_points: bool,
}

impl Feedback {
    pub fn headline(&self) -> String {
        let o = &self.outcome;
        match (o.correct, self.awards_points) {
            (true, true) => format!("Correct! You scored {} pts.", o.points),
            (true, false) => "Correct! Well done.".to_string(),
            (false, _) => format!("Incorrect. Actual: {:.3}.", o.actual),
        }
    }

    pub fn error_line(&self) -> String {
        format!(
            "Your Error: {:.3} ({:.1}%).",
            self.outcome.error, self.outcome.percent_error
        )
    }

    pub fn message(&self) -> String {
        format!("{} {}", self.headline(), self.error_line())
    }
}

/// Turns player actions into session updates followed by a screen transition
#[derive(Debug)]
pub struct Game<H: GameHost> {
    session: Session,
    state: StateMachine,
    host: H,
    selected_mode: GameMode,
    selected_duration: Option<u32>,
    feedback: Option<Feedback>,
    input_error: Option<GuessError>,
    seeds: StdRng,
}

impl<H: GameHost> Game<H> {
    /// Lands on the start screen with `mode`/`duration` preselected.
    pub fn new(mode: GameMode, duration: Option<u32>, seed: Option<u64>, host: H) -> Self {
        let mut seeds = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let session = Session::with_seed(mode, duration, seeds.gen());
        let mut game = Self {
            session,
            state: StateMachine::new(),
            host,
            selected_mode: mode,
            selected_duration: duration,
            feedback: None,
            input_error: None,
            seeds,
        };
        game.transition(GameState::StartScreen, false);
        game
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> Option<GameState> {
        self.state.current()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn selected_mode(&self) -> GameMode {
        self.selected_mode
    }

    /// Time Trial duration the next game will use.
    pub fn selected_duration(&self) -> u32 {
        GameMode::TimeTrial
            .settings()
            .timer
            .map_or(0, |t| t.resolve(self.selected_duration))
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn input_error(&self) -> Option<GuessError> {
        self.input_error
    }

    pub fn summary(&self) -> ErrorSummary {
        ErrorSummary::from_session(&self.session)
    }

    pub fn select_mode(&mut self, mode: GameMode) {
        if !self.state.is(GameState::StartScreen) {
            return;
        }
        if mode != self.selected_mode {
            debug!(from = %self.selected_mode, to = %mode, "mode selection changed");
        }
        self.selected_mode = mode;
        self.transition(GameState::StartScreen, true);
    }

    pub fn select_duration(&mut self, secs: u32) {
        if !self.state.is(GameState::StartScreen) {
            return;
        }
        let offered = GameMode::TimeTrial
            .settings()
            .timer
            .is_some_and(|t| t.available_durations.contains(&secs));
        if !offered {
            warn!(secs, "ignoring unsupported time trial duration");
            return;
        }
        self.selected_duration = Some(secs);
        self.transition(GameState::StartScreen, true);
    }

    /// Returns whether a game started.
    pub fn start(&mut self) -> bool {
        if !self.state.is(GameState::StartScreen) {
            return false;
        }
        let duration = match self.selected_mode {
            GameMode::TimeTrial => Some(self.selected_duration()),
            GameMode::Classic => None,
        };
        self.begin(self.selected_mode, duration);
        true
    }

    pub fn submit_guess(&mut self, text: &str) -> Result<GuessOutcome, GuessError> {
        if !self.state.is(GameState::ActiveGame) {
            return Err(GuessError::NotActive);
        }
        let guessed = match parse_guess(text) {
            Ok(value) => value,
            Err(e) => {
                debug!(input = text, error = %e, "guess rejected");
                self.input_error = Some(e);
                return Err(e);
            }
        };
        self.input_error = None;

        let outcome = self.session.record_guess(guessed);
        let awards_points = self.session.settings().scoring.accumulates_score();
        self.feedback = Some(Feedback {
            outcome,
            awards_points,
        });

        if !outcome.correct {
            self.session.decrease_life();
        }

        self.host.draw_distance_line(outcome.correct);

        if self.session.check_game_over() {
            self.session.stop_timer();
            self.transition(GameState::GameOver, false);
        } else {
            self.transition(GameState::ShowingFeedback, false);
        }

        Ok(outcome)
    }

    pub fn next_round(&mut self) -> bool {
        if !self.state.is(GameState::ShowingFeedback) {
            return false;
        }
        self.session.new_round();
        self.feedback = None;
        self.transition(GameState::ActiveGame, false);
        true
    }

    /// Plays again with the same mode and duration.
    pub fn restart(&mut self) -> bool {
        if !self.state.is(GameState::GameOver) {
            return false;
        }
        info!("restarting game");
        self.session.stop_timer();
        let (mode, duration) = (self.session.mode(), self.session.timer_duration());
        self.begin(mode, duration);
        true
    }

    pub fn back_to_menu(&mut self) -> bool {
        if !self.state.is(GameState::GameOver) {
            return false;
        }
        self.session.stop_timer();
        self.feedback = None;
        self.transition(GameState::StartScreen, false);
        true
    }

    pub fn advance_timer(&mut self, elapsed: Duration) {
        let mut events = Vec::new();
        self.session.advance_timer(elapsed, &mut events);
        self.dispatch_timer_events(events);
    }

    fn begin(&mut self, mode: GameMode, duration: Option<u32>) {
        self.session = Session::with_seed(mode, duration, self.seeds.gen());
        self.feedback = None;
        self.input_error = None;
        self.transition(GameState::ActiveGame, false);

        if self.session.settings().has_timer() {
            let mut events = Vec::new();
            self.session.start_timer(&mut events);
            self.dispatch_timer_events(events);
        }
    }

    fn dispatch_timer_events(&mut self, events: Vec<TimerEvent>) {
        for event in events {
            match event {
                TimerEvent::Tick(remaining) => self.host.on_timer_tick(remaining),
                TimerEvent::End => self.time_up(),
            }
        }
    }

    fn time_up(&mut self) {
        if !self.state.is(GameState::GameOver) {
            self.transition(GameState::GameOver, false);
        }
        self.session.stop_timer();
    }

    fn transition(&mut self, state: GameState, force: bool) -> bool {
        self.state.set_state(state, force, &mut self.host)
    }
}
