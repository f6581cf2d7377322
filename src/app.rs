use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::game::{Game, GameHost};
use crate::mode::GameMode;
use crate::state::{GameState, StateHost};

/// Longest guess the input field accepts.
const MAX_GUESS_LEN: usize = 12;

/// Presentation state the controller pokes at; the UI reads it when drawing.
#[derive(Debug, Default)]
pub struct TerminalHost {
    /// `Some(correct)` while the distance line is on screen.
    pub distance_line: Option<bool>,
    pub needs_redraw: bool,
    pub last_rendered: Option<GameState>,
}

impl StateHost for TerminalHost {
    fn render(&mut self, state: GameState) {
        self.last_rendered = Some(state);
        self.needs_redraw = true;
    }

    fn clear_distance_line(&mut self) {
        self.distance_line = None;
    }
}

impl GameHost for TerminalHost {
    fn draw_distance_line(&mut self, correct: bool) {
        self.distance_line = Some(correct);
    }

    fn on_timer_tick(&mut self, _remaining: u32) {
        self.needs_redraw = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub game: Game<TerminalHost>,
    pub guess_input: String,
}

impl App {
    pub fn new(mode: GameMode, duration: Option<u32>, seed: Option<u64>) -> Self {
        Self {
            game: Game::new(mode, duration, seed, TerminalHost::default()),
            guess_input: String::new(),
        }
    }

    pub fn state(&self) -> GameState {
        self.game.state().unwrap_or(GameState::StartScreen)
    }

    /// Consumes the pending redraw request, if any.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.game.host_mut().needs_redraw)
    }

    pub fn on_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return KeyOutcome::Quit;
        }

        match self.state() {
            GameState::StartScreen => self.on_start_screen_key(key.code),
            GameState::ActiveGame => self.on_active_key(key.code),
            GameState::ShowingFeedback => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char(' ')) {
                    self.guess_input.clear();
                    self.game.next_round();
                }
            }
            GameState::GameOver => match key.code {
                KeyCode::Char('r') | KeyCode::Enter => {
                    self.guess_input.clear();
                    self.game.restart();
                }
                KeyCode::Char('m') => {
                    self.guess_input.clear();
                    self.game.back_to_menu();
                }
                _ => {}
            },
        }

        self.game.host_mut().needs_redraw = true;
        KeyOutcome::Continue
    }

    fn on_start_screen_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('c') => self.game.select_mode(GameMode::Classic),
            KeyCode::Char('t') => self.game.select_mode(GameMode::TimeTrial),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                let next = match self.game.selected_mode() {
                    GameMode::Classic => GameMode::TimeTrial,
                    GameMode::TimeTrial => GameMode::Classic,
                };
                self.game.select_mode(next);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let durations = GameMode::TimeTrial
                    .settings()
                    .timer
                    .map_or(&[][..], |t| t.available_durations);
                let idx = c as usize - '1' as usize;
                if let Some(&secs) = durations.get(idx) {
                    self.game.select_duration(secs);
                }
            }
            KeyCode::Enter | KeyCode::Char('s') => {
                self.game.start();
            }
            _ => {}
        }
    }

    fn on_active_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() || matches!(c, '.' | '-' | '+') => {
                if self.guess_input.len() < MAX_GUESS_LEN {
                    self.guess_input.push(c);
                }
            }
            KeyCode::Backspace => {
                self.guess_input.pop();
            }
            KeyCode::Enter => {
                if let Err(e) = self.game.submit_guess(&self.guess_input) {
                    debug!(error = %e, "guess not accepted");
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn press(app: &mut App, code: KeyCode) -> KeyOutcome {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn escape_and_ctrl_c_quit_everywhere() {
        let mut app = App::new(GameMode::Classic, None, Some(1));
        assert_eq!(press(&mut app, KeyCode::Esc), KeyOutcome::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.on_key(ctrl_c), KeyOutcome::Quit);
    }

    #[test]
    fn start_screen_keys_pick_mode_and_duration() {
        let mut app = App::new(GameMode::Classic, None, Some(1));
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.game.selected_mode(), GameMode::TimeTrial);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.game.selected_duration(), 30);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.game.selected_duration(), 30);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.game.selected_mode(), GameMode::Classic);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state(), GameState::ActiveGame);
    }

    #[test]
    fn typing_filters_and_caps_input() {
        let mut app = App::new(GameMode::Classic, None, Some(1));
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "0.a5x");
        assert_eq!(app.guess_input, "0.5");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.guess_input, "0.");
        type_str(&mut app, "1111111111111111");
        assert_eq!(app.guess_input.len(), MAX_GUESS_LEN);
    }

    #[test]
    fn submit_then_next_clears_input() {
        let mut app = App::new(GameMode::Classic, None, Some(1));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state(), GameState::ActiveGame);
        assert!(app.game.input_error().is_some());

        type_str(&mut app, "0.4");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state(), GameState::ShowingFeedback);
        assert!(app.game.host().distance_line.is_some());

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.state(), GameState::ActiveGame);
        assert!(app.guess_input.is_empty());
        assert!(app.game.host().distance_line.is_none());
    }

    #[test]
    fn game_over_keys() {
        let mut app = App::new(GameMode::TimeTrial, Some(15), Some(1));
        press(&mut app, KeyCode::Enter);
        app.game.advance_timer(Duration::from_secs(15));
        assert_eq!(app.state(), GameState::GameOver);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.state(), GameState::ActiveGame);
        assert_eq!(app.game.session().timer_value(), 15);

        app.game.advance_timer(Duration::from_secs(15));
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.state(), GameState::StartScreen);
    }

    #[test]
    fn redraw_requests_are_consumed() {
        let mut app = App::new(GameMode::Classic, None, Some(1));
        assert!(app.take_redraw());
        assert!(!app.take_redraw());
        press(&mut app, KeyCode::Char('x'));
        assert!(app.take_redraw());
    }
}
