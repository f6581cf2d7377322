use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use eyeball::{
    app::{App, KeyOutcome},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    mode::GameMode,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, GameEventSource, Runner, Ticker},
    TICK_RATE_MS,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::{info, warn};

/// guess how far apart two dots are
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal distance-estimation game. Two dots appear on a unit square; guess the distance between them. Classic mode gives you lives, Time Trial gives you a clock and scores near misses."
)]
pub struct Cli {
    /// game mode to preselect (default: the last one played)
    #[clap(short = 'm', long, value_enum)]
    mode: Option<GameMode>,

    /// time trial duration in seconds (15 or 30)
    #[clap(short = 'd', long, value_parser = parse_duration)]
    duration: Option<u32>,

    /// seed for dot placement, for reproducible games
    #[clap(long)]
    seed: Option<u64>,

    /// write logs here instead of the state directory
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn parse_duration(s: &str) -> Result<u32, String> {
    let secs: u32 = s.parse().map_err(|_| format!("`{s}` is not a number of seconds"))?;
    let available = GameMode::TimeTrial
        .settings()
        .timer
        .map_or(&[][..], |t| t.available_durations);
    if available.contains(&secs) {
        Ok(secs)
    } else {
        Err(format!("duration must be one of {available:?}"))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let log_path = cli.log_file.clone().unwrap_or_else(AppDirs::log_path);
    if let Err(e) = logging::init(&log_path) {
        eprintln!("logging disabled ({}): {e}", log_path.display());
    }

    let store = FileConfigStore::new();
    let cfg = store.load();
    let mode = cli.mode.unwrap_or(cfg.mode);
    let duration = cli.duration.or(Some(cfg.time_trial_secs));
    info!(%mode, ?duration, seed = ?cli.seed, "starting eyeball");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(mode, duration, cli.seed);
    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let result = start_tui(&mut terminal, &mut app, &mut runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    if let Err(e) = store.save(&Config::from(&app.game)) {
        warn!(path = %store.path().display(), error = %e, "could not save config");
    }
    info!("exiting");

    result
}

fn start_tui<B: Backend, E: GameEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    app.take_redraw();

    loop {
        let timer_was_running = app.game.session().is_timer_running();

        match runner.step() {
            GameEvent::Tick(elapsed) => app.game.advance_timer(elapsed),
            GameEvent::Resize => app.game.host_mut().needs_redraw = true,
            GameEvent::Key(key) => {
                if app.on_key(key) == KeyOutcome::Quit {
                    break;
                }
            }
        }

        // a countdown that just began should not be charged for time spent on the menu
        if !timer_was_running && app.game.session().is_timer_running() {
            runner.reset_clock();
        }

        if app.take_redraw() {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        }
    }

    Ok(())
}
