use std::sync::mpsc::{self, Sender};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use eyeball::app::{App, KeyOutcome};
use eyeball::mode::GameMode;
use eyeball::runtime::{FixedTicker, GameEvent, Runner, TestEventSource};
use eyeball::session::Session;
use eyeball::state::GameState;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

fn key(tx: &Sender<GameEvent>, code: KeyCode) {
    tx.send(GameEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
        .unwrap();
}

fn type_str(tx: &Sender<GameEvent>, s: &str) {
    for c in s.chars() {
        key(tx, KeyCode::Char(c));
    }
}

// Mirrors the binary's loop minus the terminal: each queued event is one step,
// and every redraw request renders into an offscreen buffer.
fn drive(app: &mut App, runner: &mut Runner<TestEventSource, FixedTicker>, steps: usize) -> bool {
    let area = Rect::new(0, 0, 100, 40);
    for _ in 0..steps {
        match runner.step() {
            GameEvent::Tick(elapsed) => app.game.advance_timer(elapsed),
            GameEvent::Resize => app.game.host_mut().needs_redraw = true,
            GameEvent::Key(k) => {
                if app.on_key(k) == KeyOutcome::Quit {
                    return true;
                }
            }
        }
        if app.take_redraw() {
            let mut buf = Buffer::empty(area);
            (&*app).render(area, &mut buf);
        }
    }
    false
}

fn harness() -> (Sender<GameEvent>, Runner<TestEventSource, FixedTicker>) {
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );
    (tx, runner)
}

#[test]
fn classic_game_ends_after_three_misses_and_restarts() {
    let mut app = App::new(GameMode::Classic, None, Some(3));
    let (tx, mut runner) = harness();

    key(&tx, KeyCode::Enter);
    assert!(!drive(&mut app, &mut runner, 1));
    assert_eq!(app.state(), GameState::ActiveGame);
    assert_eq!(app.game.session().lives(), 3);

    for round in 1..=3u32 {
        assert_eq!(app.game.session().round_number(), round);
        // zero is off by the full distance, far outside 15%
        type_str(&tx, "0");
        key(&tx, KeyCode::Enter);
        drive(&mut app, &mut runner, 2);
        assert_eq!(app.game.session().lives(), 3 - round);
        if round < 3 {
            assert_eq!(app.state(), GameState::ShowingFeedback);
            assert_eq!(app.game.host().distance_line, Some(false));
            key(&tx, KeyCode::Enter);
            drive(&mut app, &mut runner, 1);
            assert_eq!(app.state(), GameState::ActiveGame);
            assert!(app.guess_input.is_empty());
        }
    }

    assert_eq!(app.state(), GameState::GameOver);
    let summary = app.game.summary();
    assert_eq!(summary.guesses, 3);
    assert_eq!(summary.total_score, 0);

    key(&tx, KeyCode::Char('r'));
    drive(&mut app, &mut runner, 1);
    assert_eq!(app.state(), GameState::ActiveGame);
    assert_eq!(app.game.session().lives(), 3);
    assert_eq!(app.game.session().round_number(), 1);
    assert!(app.game.session().error_history().is_empty());

    key(&tx, KeyCode::Esc);
    assert!(drive(&mut app, &mut runner, 1));
}

#[test]
fn classic_streak_restores_a_lost_life() {
    let mut app = App::new(GameMode::Classic, None, Some(9));
    let (tx, mut runner) = harness();

    key(&tx, KeyCode::Char('s'));
    type_str(&tx, "0");
    key(&tx, KeyCode::Enter);
    key(&tx, KeyCode::Char('n'));
    drive(&mut app, &mut runner, 4);
    assert_eq!(app.game.session().lives(), 2);

    for _ in 0..3 {
        assert_eq!(app.state(), GameState::ActiveGame);
        let actual = app.game.session().round().actual_distance;
        type_str(&tx, &format!("{actual:.6}"));
        key(&tx, KeyCode::Enter);
        drive(&mut app, &mut runner, 9);
        assert_eq!(app.state(), GameState::ShowingFeedback);
        assert_eq!(app.game.host().distance_line, Some(true));
        key(&tx, KeyCode::Char(' '));
        drive(&mut app, &mut runner, 1);
    }

    assert_eq!(app.game.session().lives(), 3);
    assert_eq!(app.game.session().consecutive_correct(), 0);
}

#[test]
fn bad_input_keeps_the_round_open() {
    let mut app = App::new(GameMode::Classic, None, Some(5));
    let (tx, mut runner) = harness();

    key(&tx, KeyCode::Enter);
    key(&tx, KeyCode::Enter);
    type_str(&tx, "..");
    key(&tx, KeyCode::Enter);
    drive(&mut app, &mut runner, 5);

    assert_eq!(app.state(), GameState::ActiveGame);
    assert!(app.game.input_error().is_some());
    assert!(app.game.session().error_history().is_empty());
    assert_eq!(app.game.session().lives(), 3);
}

#[test]
fn time_trial_runs_out_on_injected_ticks() {
    let mut app = App::new(GameMode::Classic, None, Some(1));
    let (tx, mut runner) = harness();

    key(&tx, KeyCode::Char('t'));
    key(&tx, KeyCode::Enter);
    drive(&mut app, &mut runner, 2);
    assert_eq!(app.state(), GameState::ActiveGame);
    assert!(app.game.session().is_timer_running());
    assert_eq!(app.game.session().timer_value(), 15);

    // a near miss still scores under Weber and does not end the game
    let actual = app.game.session().round().actual_distance;
    type_str(&tx, &format!("{:.6}", actual * 1.01));
    key(&tx, KeyCode::Enter);
    key(&tx, KeyCode::Enter);
    drive(&mut app, &mut runner, 10);
    assert_eq!(app.state(), GameState::ActiveGame);
    assert!(app.game.session().total_score() > 0);

    for _ in 0..14 {
        tx.send(GameEvent::Tick(Duration::from_secs(1))).unwrap();
    }
    drive(&mut app, &mut runner, 14);
    assert_eq!(app.game.session().timer_value(), 1);
    assert_eq!(app.state(), GameState::ActiveGame);

    tx.send(GameEvent::Tick(Duration::from_secs(1))).unwrap();
    drive(&mut app, &mut runner, 1);
    assert_eq!(app.game.session().timer_value(), 0);
    assert!(!app.game.session().is_timer_running());
    assert_eq!(app.state(), GameState::GameOver);

    // further ticks are inert once the clock has stopped
    tx.send(GameEvent::Tick(Duration::from_secs(5))).unwrap();
    drive(&mut app, &mut runner, 1);
    assert_eq!(app.state(), GameState::GameOver);

    key(&tx, KeyCode::Char('m'));
    drive(&mut app, &mut runner, 1);
    assert_eq!(app.state(), GameState::StartScreen);
    assert_eq!(app.game.selected_mode(), GameMode::TimeTrial);
}

#[test]
fn seeded_sessions_replay_the_same_rounds() {
    let mut a = Session::with_seed(GameMode::Classic, None, 42);
    let mut b = Session::with_seed(GameMode::Classic, None, 42);
    for _ in 0..5 {
        assert_eq!(a.round().dot1, b.round().dot1);
        assert_eq!(a.round().dot2, b.round().dot2);
        a.new_round();
        b.new_round();
    }
}
