use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum GameState {
    StartScreen,
    ActiveGame,
    ShowingFeedback,
    GameOver,
}

/// Presentation side of a transition. The state machine never draws anything itself.
pub trait StateHost {
    /// Called exactly once for every real transition.
    fn render(&mut self, state: GameState);
    /// Drop the distance line drawn while showing feedback.
    fn clear_distance_line(&mut self);
}

/// Holds the current screen and guards transitions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateMachine {
    current: Option<GameState>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<GameState> {
        self.current
    }

    pub fn is(&self, state: GameState) -> bool {
        self.current == Some(state)
    }

    /// Returns whether a transition happened. `force` re-renders the current state.
    pub fn set_state<H: StateHost + ?Sized>(
        &mut self,
        new_state: GameState,
        force: bool,
        host: &mut H,
    ) -> bool {
        if !force && self.current == Some(new_state) {
            debug!(state = %new_state, "already active, no transition");
            return false;
        }

        info!(from = ?self.current, to = %new_state, force, "state transition");
        self.current = Some(new_state);

        if new_state != GameState::ShowingFeedback {
            host.clear_distance_line();
        }
        host.render(new_state);
        true
    }
}
