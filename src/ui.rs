pub mod charting;
pub mod screen;

use screen::Screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Rectangle},
        Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget, Wrap,
    },
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    mode::GameMode,
    session::Session,
    state::GameState,
    stats::ErrorSummary,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.state()).render(self, area, buf);
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn italic() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

fn dim_bold() -> Style {
    bold().add_modifier(Modifier::DIM)
}

fn check(selected: bool) -> &'static str {
    if selected {
        "[x]"
    } else {
        "[ ]"
    }
}

pub(crate) fn render_start(app: &App, area: Rect, buf: &mut Buffer) {
    let game = &app.game;
    let mode = game.selected_mode();

    let mut lines = vec![
        Line::from(Span::styled("E Y E B A L L", bold().fg(Color::Cyan))),
        Line::from(""),
        Line::from(Span::styled(
            "How far apart are the two dots? The plane is one unit wide.",
            italic(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Mode:  ", bold()),
            Span::raw(format!("{} (c)lassic    ", check(mode == GameMode::Classic))),
            Span::raw(format!("{} (t)ime trial", check(mode == GameMode::TimeTrial))),
        ]),
    ];

    let settings = mode.settings();
    let description = match settings.timer {
        None => format!(
            "{} lives. Within 15% counts as correct; three in a row wins a life back.",
            settings.initial_lives
        ),
        Some(_) => {
            "Beat the clock. Near misses score up to 100 points, scaled to the distance."
                .to_string()
        }
    };
    lines.push(Line::from(Span::styled(
        description,
        Style::default().fg(Color::Gray),
    )));

    if let Some(timer) = settings.timer {
        let selected = game.selected_duration();
        let mut spans = vec![Span::styled("Duration:  ", bold())];
        for (i, secs) in timer.available_durations.iter().enumerate() {
            spans.push(Span::raw(format!(
                "{} ({}) {}s    ",
                check(*secs == selected),
                i + 1,
                secs
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(spans));
    }

    let height = lines.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        "(c)lassic / (t)ime trial / (1-2) duration / (enter) start / (esc)ape",
        italic(),
    ))
    .render(chunks[3], buf);
}

/// Status line; falls back to a compact form on narrow terminals.
fn status_line(session: &Session, width: u16) -> String {
    let mean = if session.error_history().is_empty() {
        "N/A".to_string()
    } else {
        format!("{:.3}", session.running_mean_error())
    };
    let clock_or_lives = match session.settings().timer {
        Some(_) => format!("Time: {}s", session.timer_value()),
        None => format!(
            "Lives: {}{}",
            "♥".repeat(session.lives() as usize),
            "·".repeat(session.settings().initial_lives.saturating_sub(session.lives()) as usize)
        ),
    };

    let full = format!(
        "Round {}   {}   Mean error: {}   Score: {}",
        session.round_number(),
        clock_or_lives,
        mean,
        session.total_score()
    );
    if full.width() <= width as usize {
        return full;
    }
    format!(
        "R{} {} err {} pts {}",
        session.round_number(),
        clock_or_lives,
        mean,
        session.total_score()
    )
}

/// Largest square (in screen terms, two columns per row) that fits `area`.
fn plane_area(area: Rect) -> Rect {
    let side = area.height.min(area.width / 2);
    let width = side * 2;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - side) / 2,
        width,
        height: side,
    }
}

fn render_plane(app: &App, area: Rect, buf: &mut Buffer) {
    let round = *app.game.session().round();
    let line = app.game.host().distance_line;
    // screen rows grow downwards, canvas y grows upwards
    let (x1, y1) = (round.dot1.x, 1.0 - round.dot1.y);
    let (x2, y2) = (round.dot2.x, 1.0 - round.dot2.y);

    Canvas::default()
        .block(Block::default().borders(Borders::ALL))
        .marker(Marker::Braille)
        .x_bounds([0.0, 1.0])
        .y_bounds([0.0, 1.0])
        .paint(move |ctx| {
            ctx.draw(&Rectangle {
                x: 0.0,
                y: 0.0,
                width: 1.0,
                height: 1.0,
                color: Color::DarkGray,
            });
            if let Some(correct) = line {
                ctx.draw(&CanvasLine {
                    x1,
                    y1,
                    x2,
                    y2,
                    color: if correct { Color::Green } else { Color::Rgb(255, 152, 0) },
                });
            }
            ctx.layer();
            ctx.print(x1, y1, Span::styled("●", bold().fg(Color::Red)));
            ctx.print(x2, y2, Span::styled("●", bold().fg(Color::Blue)));
        })
        .render(plane_area(area), buf);
}

pub(crate) fn render_play(app: &App, area: Rect, buf: &mut Buffer) {
    let game = &app.game;
    let session = game.session();
    let active = app.state() == GameState::ActiveGame;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // status
            Constraint::Min(5),    // plane
            Constraint::Length(1), // guess
            Constraint::Length(2), // feedback
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(
        status_line(session, chunks[0].width),
        bold(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    render_plane(app, chunks[1], buf);

    let mut guess = vec![
        Span::styled("Distance: ", bold()),
        Span::styled(
            app.guess_input.clone(),
            if active { bold() } else { dim_bold() },
        ),
    ];
    if active {
        guess.push(Span::styled(
            "_",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    Paragraph::new(Line::from(guess))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    let feedback = match (game.input_error(), game.feedback()) {
        (Some(e), _) if active => Some(Span::styled(e.to_string(), bold().fg(Color::Red))),
        (_, Some(f)) if !active => {
            let color = if f.outcome.correct { Color::Green } else { Color::Red };
            Some(Span::styled(f.message(), bold().fg(color)))
        }
        _ => None,
    };
    if let Some(span) = feedback {
        Paragraph::new(span)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[3], buf);
    }

    let legend = if active {
        "(0-9 . -) type / (enter) submit / (esc)ape"
    } else {
        "(enter) next round / (esc)ape"
    };
    Paragraph::new(Span::styled(legend, italic())).render(chunks[4], buf);
}

pub(crate) fn render_game_over(app: &App, area: Rect, buf: &mut Buffer) {
    let summary = app.game.summary();
    let errors = app.game.session().error_history();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Min(1),    // chart
            Constraint::Length(1), // headline stats
            Constraint::Length(1), // spread
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(
        format!("GAME OVER  ({})", app.game.session().mode()),
        bold().fg(Color::Magenta),
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    let (overall_guesses, highest_error) = charting::compute_chart_params(errors);
    let points = charting::error_series(errors);
    let datasets = vec![Dataset::default()
        .marker(Marker::Braille)
        .style(Style::default().fg(Color::Magenta))
        .graph_type(GraphType::Line)
        .data(&points)];

    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("guess")
                .bounds([1.0, overall_guesses])
                .labels(vec![
                    Span::styled("1", bold()),
                    Span::styled(charting::format_label(overall_guesses), bold()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("error")
                .bounds([0.0, highest_error])
                .labels(vec![
                    Span::styled("0", bold()),
                    Span::styled(charting::format_label(highest_error), bold()),
                ]),
        )
        .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!(
            "Final score: {}   Mean error: {:.3}   Rounds: {}",
            summary.total_score, summary.mean_error, summary.rounds
        ),
        bold(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        format!(
            "Best: {}   Worst: {}   Spread: {:.3} sd",
            ErrorSummary::format_error(summary.best_error),
            ErrorSummary::format_error(summary.worst_error),
            summary.std_dev
        ),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    Paragraph::new(Span::styled("(r)estart / (m)enu / (esc)ape", italic()))
        .render(chunks[5], buf);
}
