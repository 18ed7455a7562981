use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use tracing::debug;

use crate::actions::Action;
use crate::pomodoro::{
    Clock, Poller, SessionDot, SessionType, SystemClock, TickOutcome, TimerState,
    TimerStateMachine, TimerStatus,
};

/// Theme colors
pub struct Theme {
    pub fg: Color,
    pub dim: Color,
    pub track: Color,
    pub error: Color,
    pub work: Color,
    pub short_break: Color,
    pub long_break: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::Rgb(224, 230, 237),
            dim: Color::Rgb(100, 100, 100),
            track: Color::Rgb(40, 44, 52),
            error: Color::Rgb(220, 53, 69),
            work: Color::Rgb(59, 130, 246),       // blue
            short_break: Color::Rgb(52, 211, 153), // green
            long_break: Color::Rgb(245, 158, 11),  // amber
        }
    }
}

impl Theme {
    pub fn accent(&self, session_type: SessionType) -> Color {
        match session_type {
            SessionType::Work => self.work,
            SessionType::ShortBreak => self.short_break,
            SessionType::LongBreak => self.long_break,
        }
    }
}

/// Main application state
pub struct App<P: Poller, C: Clock = SystemClock> {
    /// The countdown and its session cycle
    pub timer: TimerStateMachine<P, C>,
    /// Current message to display
    pub error_message: Option<String>,
    /// Theme
    pub theme: Theme,
}

impl<P: Poller, C: Clock> App<P, C> {
    pub fn new(timer: TimerStateMachine<P, C>) -> Self {
        Self {
            timer,
            error_message: None,
            theme: Theme::default(),
        }
    }

    /// Handle an action and return whether to quit
    pub fn handle_action(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::KeyPress(key) => self.handle_key(key),
            Action::Tick => {
                if let TickOutcome::Completed { finished, next } = self.timer.tick() {
                    debug!("{:?} finished, waiting to start {:?}", finished, next);
                }
                Ok(false)
            }
            Action::Error(msg) => {
                self.error_message = Some(msg);
                Ok(false)
            }
            Action::Quit => Ok(true),
        }
    }

    /// Disarm the poller before the terminal is restored
    pub fn shutdown(&mut self) {
        self.timer.shutdown();
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        // Clear message on any key press
        self.error_message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(true);
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle(),
            KeyCode::Char('s') => self.timer.start(),
            KeyCode::Char('p') => self.timer.pause(),
            KeyCode::Char('r') => self.timer.reset(),
            _ => {}
        }
        Ok(false)
    }

    fn toggle(&mut self) {
        if self.timer.state().status == TimerStatus::Running {
            self.timer.pause();
        } else {
            self.timer.start();
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Timer
                Constraint::Length(3), // Footer/controls
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.render_timer(frame, chunks[1]);
        self.render_footer(frame, chunks[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let accent = self.theme.accent(self.timer.state().session_type);
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                " Pomodoro ",
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled("│ Focus timer", Style::default().fg(self.theme.dim)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.dim)),
        );
        frame.render_widget(title, area);
    }

    fn render_timer(&self, frame: &mut Frame, area: Rect) {
        let state: TimerState = self.timer.snapshot();
        let accent = self.theme.accent(state.session_type);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Top padding
                Constraint::Length(1), // Digits
                Constraint::Length(1), // Label
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Progress
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Session dots
                Constraint::Min(0),    // Bottom padding
            ])
            .split(inner);

        let digits = Paragraph::new(Line::from(Span::styled(
            state.formatted_time(),
            Style::default().fg(self.theme.fg).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(digits, rows[1]);

        let label = Paragraph::new(Line::from(Span::styled(
            state.session_label().to_uppercase(),
            Style::default().fg(accent),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(label, rows[2]);

        let ratio = (state.progress_percent() / 100.0).clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(accent).bg(self.theme.track))
            .ratio(ratio)
            .label(format!("{:.0}%", ratio * 100.0));
        frame.render_widget(gauge, centered_columns(60, rows[4]));

        let mut dots = Vec::new();
        for (i, dot) in state.session_dots().into_iter().enumerate() {
            if i > 0 {
                dots.push(Span::raw("  "));
            }
            let span = match dot {
                SessionDot::Completed => Span::styled("●", Style::default().fg(accent)),
                SessionDot::Current => Span::styled(
                    "◉",
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                ),
                SessionDot::Future => Span::styled("○", Style::default().fg(self.theme.dim)),
            };
            dots.push(span);
        }
        frame.render_widget(
            Paragraph::new(Line::from(dots)).alignment(Alignment::Center),
            rows[6],
        );
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let content = if let Some(ref msg) = self.error_message {
            Line::from(Span::styled(
                format!(" {} ", msg),
                Style::default().fg(self.theme.error),
            ))
        } else {
            let primary = self.timer.state().primary_control();
            Line::from(Span::styled(
                format!(" Space: {} │ r: Reset │ q: Quit ", primary),
                Style::default().fg(self.theme.dim),
            ))
        };

        let footer = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.dim)),
        );
        frame.render_widget(footer, area);
    }
}

/// Horizontally centered slice of `r`, `percent_x` wide
fn centered_columns(percent_x: u16, r: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(r)[1]
}
