use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::scoring::ScoringPolicy;

/// Upper bound on lives in any mode.
pub const MAX_LIVES: u32 = 5;
/// Lives a classic game starts with.
pub const INITIAL_LIVES: u32 = 3;
/// Keeps dots away from the edge of the plane.
pub const DOT_SPAWN_MARGIN: f64 = 0.05;
/// Tolerance used by the classic pass/fail check.
pub const CORRECT_ENOUGH_PERCENTAGE: f64 = 0.15;
/// Weber tolerance floor.
pub const WEBER_A: f64 = 0.015;
/// Weber tolerance slope.
pub const WEBER_B: f64 = 0.10;
/// Correct guesses in a row needed for a bonus life.
pub const STREAK_FOR_BONUS_LIFE: u32 = 3;

#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    #[default]
    Classic,
    #[strum(to_string = "Time Trial")]
    TimeTrial,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerSettings {
    pub available_durations: &'static [u32],
    pub default_duration: u32,
}

impl TimerSettings {
    /// Picks the requested duration when it is offered, else the default.
    pub fn resolve(&self, requested: Option<u32>) -> u32 {
        match requested {
            Some(secs) if self.available_durations.contains(&secs) => secs,
            _ => self.default_duration,
        }
    }
}

/// Everything that differs between modes lives here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeSettings {
    pub initial_lives: u32,
    pub timer: Option<TimerSettings>,
    pub scoring: ScoringPolicy,
}

impl ModeSettings {
    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Finite lives and no clock.
    pub fn has_lives(&self) -> bool {
        self.initial_lives > 0 && !self.has_timer()
    }
}

const CLASSIC: ModeSettings = ModeSettings {
    initial_lives: INITIAL_LIVES,
    timer: None,
    scoring: ScoringPolicy::Threshold {
        percentage: CORRECT_ENOUGH_PERCENTAGE,
    },
};

const TIME_TRIAL: ModeSettings = ModeSettings {
    initial_lives: 0,
    timer: Some(TimerSettings {
        available_durations: &[15, 30],
        default_duration: 15,
    }),
    scoring: ScoringPolicy::Weber {
        a: WEBER_A,
        b: WEBER_B,
    },
};

impl GameMode {
    pub fn settings(self) -> &'static ModeSettings {
        match self {
            GameMode::Classic => &CLASSIC,
            GameMode::TimeTrial => &TIME_TRIAL,
        }
    }
}
