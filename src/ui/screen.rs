use ratatui::{buffer::Buffer, layout::Rect};

use crate::{app::App, state::GameState};

/// A UI Screen boundary: one per game state
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

pub struct StartScreen;

impl Screen for StartScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        super::render_start(app, area, buf);
    }
}

/// Shared by the active round and the feedback view; they differ only in the bottom lines
pub struct PlayScreen;

impl Screen for PlayScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        super::render_play(app, area, buf);
    }
}

pub struct GameOverScreen;

impl Screen for GameOverScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        super::render_game_over(app, area, buf);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: GameState) -> Box<dyn Screen> {
    match state {
        GameState::StartScreen => Box::new(StartScreen),
        GameState::ActiveGame | GameState::ShowingFeedback => Box::new(PlayScreen),
        GameState::GameOver => Box::new(GameOverScreen),
    }
}
