// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Full-screen frontend: output log on the left, queue on the right.
//!
//! The terminal is drawn on a fixed area that only changes when the event
//! loop hands over a new [`Viewport`]; the backend is never asked for its
//! size while rendering.

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use fairie_core::{LogEntry, OnFailure, RunState};
use fairie_engine::{Frontend, JobStatus, UiEvent, View, Viewport};
use futures_util::StreamExt;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, Paragraph};
use ratatui::{Frame, Terminal, TerminalOptions};
use std::io::{self, Stdout};
use std::ops::Range;
use tokio::sync::mpsc;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const ACCENT: Color = Color::Magenta;

/// Rows shown above the current job in the sidebar.
const SIDEBAR_LEAD: usize = 10;

pub struct TerminalFrontend<B: Backend> {
    terminal: Terminal<B>,
    area: Rect,
    owns_screen: bool,
}

impl TerminalFrontend<CrosstermBackend<Stdout>> {
    /// Switch the terminal to raw mode and the alternate screen. Both are
    /// restored on drop.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let mut frontend = Self::with_backend(CrosstermBackend::new(stdout))?;
        frontend.owns_screen = true;
        Ok(frontend)
    }
}

impl<B: Backend> TerminalFrontend<B> {
    /// Start with the backend's current size as the drawing area.
    pub fn with_backend(backend: B) -> io::Result<Self> {
        let size = backend.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        let options = TerminalOptions { viewport: ratatui::Viewport::Fixed(area) };
        let terminal = Terminal::with_options(backend, options)?;
        Ok(Self { terminal, area, owns_screen: false })
    }

    /// Size of the drawing area.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.area.width, self.area.height)
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> Frontend for TerminalFrontend<B> {
    fn render(&mut self, view: &View<'_>) -> io::Result<()> {
        let area = Rect::new(0, 0, view.viewport.width, view.viewport.height);
        if area != self.area {
            tracing::debug!(width = area.width, height = area.height, "terminal resized");
            self.terminal.resize(area)?;
            self.area = area;
        }
        self.terminal.draw(|frame| draw(frame, view))?;
        Ok(())
    }
}

impl<B: Backend> Drop for TerminalFrontend<B> {
    fn drop(&mut self) {
        if self.owns_screen {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = self.terminal.show_cursor();
        }
    }
}

fn draw(frame: &mut Frame, view: &View<'_>) {
    let [body, help] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(frame.area());
    let [main, sidebar, _] = Layout::horizontal([
        Constraint::Percentage(65),
        Constraint::Percentage(30),
        Constraint::Min(0),
    ])
    .areas(body);

    draw_log(frame, main, view);
    draw_queue(frame, sidebar, view);
    draw_help(frame, help, view);
}

fn panel(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT))
        .title(title)
}

fn draw_log(frame: &mut Frame, area: Rect, view: &View<'_>) {
    let title = match view.state.current_index().and_then(|i| view.queue.get(i)) {
        Some(job) => format!(" {} ", job.name()),
        None => " fairie ".to_string(),
    };
    let rows = usize::from(area.height.saturating_sub(2));
    let mut lines: Vec<Line> = view.log.tail(rows).iter().map(entry_line).collect();
    if lines.is_empty() && view.state.is_terminal() {
        lines.push(Line::styled(closing_text(view), Style::default().fg(Color::DarkGray)));
    }
    frame.render_widget(Paragraph::new(lines).block(panel(title)), area);
}

fn entry_line(entry: &LogEntry) -> Line<'_> {
    match entry {
        LogEntry::Output(text) => Line::raw(text.as_str()),
        LogEntry::Marker(text) if text.starts_with('✗') => {
            Line::styled(text.as_str(), Style::default().fg(Color::Red))
        }
        LogEntry::Marker(text) => {
            Line::styled(text.as_str(), Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        }
    }
}

fn closing_text(view: &View<'_>) -> String {
    if matches!(view.state, RunState::Terminated) {
        return "interrupted".to_string();
    }
    if view.queue.is_empty() {
        return "nothing to install".to_string();
    }
    let failed = view.failed_count();
    format!("{} installed, {failed} failed", view.history.len() - failed)
}

fn draw_queue(frame: &mut Frame, area: Rect, view: &View<'_>) {
    let rows = usize::from(area.height.saturating_sub(2));
    let current = view.state.current_index().unwrap_or(view.queue.len());
    let items: Vec<ListItem> = sidebar_window(current, view.queue.len(), rows)
        .filter_map(|index| view.queue.get(index).map(|job| (index, job)))
        .map(|(index, job)| {
            let (mark, style) = match view.status(index) {
                JobStatus::Running => (spinner(view.frame), Style::default().fg(ACCENT)),
                JobStatus::Done => ("✓", Style::default().fg(Color::Green)),
                JobStatus::Failed => ("✗", Style::default().fg(Color::Red)),
                JobStatus::Pending => (" ", Style::default()),
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::raw(" "),
                Span::raw(job.name().as_str()),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items).block(panel(" queue ".to_string())), area);
}

fn draw_help(frame: &mut Frame, area: Rect, view: &View<'_>) {
    let waiting =
        matches!(view.state, RunState::JobFailed(..)) && view.on_failure == OnFailure::Pause;
    let next_style = if waiting {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let line = Line::from(vec![
        Span::styled("q quit", Style::default().fg(Color::DarkGray)),
        Span::styled(" · ", Style::default().fg(Color::DarkGray)),
        Span::styled("n next", next_style),
        Span::styled(
            format!("   {}/{}", view.history.len(), view.queue.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn spinner(frame: u64) -> &'static str {
    SPINNER[(frame % SPINNER.len() as u64) as usize]
}

/// Queue rows to show: up to `rows` entries keeping `current` in view with
/// some history above it. `current == len` shows the tail.
pub(crate) fn sidebar_window(current: usize, len: usize, rows: usize) -> Range<usize> {
    let lead = SIDEBAR_LEAD.min(rows.saturating_sub(1));
    let start = current.saturating_sub(lead).min(len.saturating_sub(rows));
    let end = (start + rows).min(len);
    start..end
}

/// Map a terminal event to loop input.
pub(crate) fn ui_event(event: &Event) -> Option<UiEvent> {
    match event {
        Event::Key(key) => key_event(key),
        Event::Resize(width, height) => Some(UiEvent::Resize { width: *width, height: *height }),
        _ => None,
    }
}

fn key_event(key: &KeyEvent) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(UiEvent::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
        KeyCode::Char('n') | KeyCode::Enter => Some(UiEvent::Resume),
        _ => None,
    }
}

/// Read terminal input on its own task and forward it to the event loop.
pub fn spawn_input(events: mpsc::Sender<UiEvent>) {
    tokio::spawn(async move {
        let mut stream = EventStream::new();
        while let Some(next) = stream.next().await {
            let event = match next {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, "terminal input failed");
                    break;
                }
            };
            let Some(ui) = ui_event(&event) else {
                continue;
            };
            if events.send(ui).await.is_err() {
                break;
            }
        }
    });
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
