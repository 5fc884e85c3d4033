//! UI rendering module for Photogrid
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components. Rendering reads `App` and
//! never changes it.

pub mod grid;
pub mod help_overlay;
pub mod pagination;
pub mod search_bar;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, InputMode};

pub use grid::render as render_grid;
pub use help_overlay::render as render_help_overlay;
pub use pagination::render as render_pagination;
pub use search_bar::render as render_search_bar;

/// Renders the whole screen
///
/// Layout, top to bottom: search bar, error banner, card grid, pagination
/// controls, key hints.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Length(1), // Error banner
            Constraint::Min(6),    // Card grid
            Constraint::Length(2), // Pagination
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    search_bar::render(frame, app, chunks[0]);
    render_error_banner(frame, app, chunks[1]);
    grid::render(frame, app, chunks[2]);
    pagination::render(frame, app, chunks[3]);
    render_key_hints(frame, app, chunks[4]);

    if app.show_help {
        help_overlay::render(frame);
    }
}

/// Renders the error message, if any, in red
fn render_error_banner(frame: &mut Frame, app: &App, area: Rect) {
    let Some(message) = app.controller.state().error_message.as_deref() else {
        return;
    };

    let banner = Paragraph::new(message)
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);

    frame.render_widget(banner, area);
}

/// Renders the key hints for the current input mode
fn render_key_hints(frame: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = match app.mode {
        InputMode::Browse => &[
            ("/", " Search  "),
            ("←/→", " Page  "),
            ("g", " Go to page  "),
            ("↑/↓", " Select  "),
            ("o", " Open  "),
            ("?", " Help  "),
            ("q", " Quit"),
        ],
        InputMode::Search | InputMode::PageJump => {
            &[("Enter", " Submit  "), ("Esc", " Cancel")]
        }
    };

    let mut spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(*key, Style::default().fg(Color::Yellow)),
                Span::raw(*label),
            ]
        })
        .collect();

    if let Some(note) = &app.status_message {
        spans.push(Span::styled(
            format!(" │ {}", note),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
