//! Full-screen keypad front-end
//!
//! A fixed keypad of symbolic buttons mapped 1:1 to input state machine
//! events. Evaluate-and-record runs on a background task so the render
//! loop never blocks on the database; completions come back over a
//! channel and superseded ones are discarded by the session.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use ratatui::Terminal;
use tally_engine::Operator;
use tally_session::{CalcSession, Completion, Display, InputEvent};
use tally_store::{CalculationStore, FailureJournal};
use tokio::sync::mpsc;

/// Button labels, in keypad order. Empty cells are not drawn.
const KEYPAD: [[&str; 4]; 5] = [
    ["AC", "DEL", "/", "*"],
    ["7", "8", "9", "-"],
    ["4", "5", "6", "+"],
    ["1", "2", "3", "="],
    ["0", ".", "", ""],
];

const TICK_RATE: Duration = Duration::from_millis(50);

struct App<S: CalculationStore> {
    session: CalcSession<S>,
    history: Option<Vec<String>>,
    status: Option<String>,
}

pub async fn run<S>(store: Arc<S>, journal: FailureJournal) -> Result<()>
where
    S: CalculationStore + 'static,
{
    // Initialize terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    stdout
        .execute(EnterAlternateScreen)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_loop(&mut terminal, store, journal).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    terminal
        .backend_mut()
        .execute(LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;

    result
}

async fn run_loop<S>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: Arc<S>,
    journal: FailureJournal,
) -> Result<()>
where
    S: CalculationStore + 'static,
{
    let mut app = App {
        session: CalcSession::new(Arc::clone(&store), journal.clone()),
        history: None,
        status: None,
    };
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();

    loop {
        // Apply any completions that arrived since the last tick
        while let Ok(completion) = rx.try_recv() {
            app.session.complete(completion);
        }

        terminal.draw(|f| draw(f, &app))?;

        if !event::poll(TICK_RATE).context("Failed to poll events")? {
            continue;
        }
        let Event::Key(key) = event::read().context("Failed to read event")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Char('h') => {
                if app.history.is_some() {
                    app.history = None;
                } else {
                    match store.list_all().await {
                        Ok(lines) => app.history = Some(lines),
                        Err(err) => {
                            journal.append(&err.to_string());
                            app.status = Some(format!("history unavailable: {err}"));
                        },
                    }
                }
            },
            code => {
                if let Some(input) = map_key(code) {
                    app.history = None;
                    app.status = None;
                    if let Some(job) = app.session.apply_event(input) {
                        // Evaluate-and-record off the render loop
                        let ctx = app.session.context();
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            let _ = tx.send(ctx.run(job).await);
                        });
                    }
                }
            },
        }
    }
}

/// 1:1 key-to-event mapping for the keypad surface
fn map_key(code: KeyCode) -> Option<InputEvent> {
    match code {
        KeyCode::Char(ch) if ch.is_ascii_digit() || ch == '.' => Some(InputEvent::Digit(ch)),
        KeyCode::Char('+') => Some(InputEvent::Operator(Operator::Add)),
        KeyCode::Char('-') => Some(InputEvent::Operator(Operator::Subtract)),
        KeyCode::Char('*') | KeyCode::Char('x') => Some(InputEvent::Operator(Operator::Multiply)),
        KeyCode::Char('/') => Some(InputEvent::Operator(Operator::Divide)),
        KeyCode::Char('=') | KeyCode::Enter => Some(InputEvent::Evaluate),
        KeyCode::Backspace => Some(InputEvent::Delete),
        KeyCode::Char('c') | KeyCode::Delete => Some(InputEvent::Clear),
        _ => None,
    }
}

fn draw<S: CalculationStore>(f: &mut ratatui::Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(15),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_display(f, app, chunks[0]);
    draw_keypad(f, chunks[1]);
    draw_status(f, app, chunks[2]);

    if let Some(lines) = &app.history {
        draw_history(f, lines, f.area());
    }
}

fn draw_display<S: CalculationStore>(f: &mut ratatui::Frame, app: &App<S>, area: Rect) {
    let entry = app.session.buffer().to_display();
    let result_line = match app.session.display() {
        Display::Idle => Line::from(""),
        Display::Result(evaluated) => Line::from(Span::styled(
            evaluated.rendered.clone(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Display::Error => Line::from(Span::styled(
            "Error",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
    };

    let display = Paragraph::new(vec![Line::from(entry), result_line])
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL).title(" Tally "));
    f.render_widget(display, area);
}

fn draw_keypad(f: &mut ratatui::Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    for (row_labels, row_area) in KEYPAD.iter().zip(rows.iter()) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(*row_area);

        for (label, cell) in row_labels.iter().zip(cells.iter()) {
            if label.is_empty() {
                continue;
            }
            let style = match *label {
                "AC" | "DEL" => Style::default().fg(Color::Yellow),
                "=" => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                "+" | "-" | "*" | "/" => Style::default().fg(Color::Cyan),
                _ => Style::default(),
            };
            let button = Paragraph::new(*label)
                .style(style)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(button, *cell);
        }
    }
}

fn draw_status<S: CalculationStore>(f: &mut ratatui::Frame, app: &App<S>, area: Rect) {
    let text = match &app.status {
        Some(status) => status.clone(),
        None => " [q]uit  [h]istory  [c]lear  [backspace] delete  [enter] =".to_string(),
    };
    let style = if app.status.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    f.render_widget(Paragraph::new(text).style(style), area);
}

fn draw_history(f: &mut ratatui::Frame, lines: &[String], area: Rect) {
    let popup = centered_rect(80, 70, area);

    let items: Vec<ListItem> = if lines.is_empty() {
        vec![ListItem::new("No calculations recorded yet.")]
    } else {
        lines.iter().map(|line| ListItem::new(line.as_str())).collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" History ({}) - press h to close ", lines.len())),
    );

    f.render_widget(Clear, popup);
    f.render_widget(list, popup);
}

/// Centered sub-rectangle sized as a percentage of the containing area
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keypad_labels_map_to_events() {
        assert_eq!(map_key(KeyCode::Char('7')), Some(InputEvent::Digit('7')));
        assert_eq!(map_key(KeyCode::Char('.')), Some(InputEvent::Digit('.')));
        assert_eq!(
            map_key(KeyCode::Char('*')),
            Some(InputEvent::Operator(Operator::Multiply))
        );
        assert_eq!(map_key(KeyCode::Enter), Some(InputEvent::Evaluate));
        assert_eq!(map_key(KeyCode::Backspace), Some(InputEvent::Delete));
        assert_eq!(map_key(KeyCode::Char('c')), Some(InputEvent::Clear));
        // no modulo key on the keypad
        assert_eq!(map_key(KeyCode::Char('%')), None);
    }
}
