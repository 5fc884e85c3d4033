//! Pagination controls rendering
//!
//! Renders the Previous/Next buttons, the page-jump field and the
//! "Page X of Y" readout, with a loading marker and data freshness.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, InputMode};

/// Renders the pagination row and page readout
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.controller.state();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let jump_style = if app.mode == InputMode::PageJump {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let jump_text = if app.page_input.is_empty() && app.mode != InputMode::PageJump {
        format!("[{:^6}]", "1")
    } else {
        format!("[{:^6}]", app.page_input)
    };

    let controls = Line::from(vec![
        button("◀ Previous", state.can_go_previous()),
        Span::raw("   "),
        Span::styled("Go to ", Style::default().fg(Color::Gray)),
        Span::styled(jump_text, jump_style),
        Span::raw("   "),
        button("Next ▶", state.can_go_next()),
    ]);
    frame.render_widget(
        Paragraph::new(controls).alignment(Alignment::Center),
        chunks[0],
    );

    let mut readout = vec![Span::styled(
        page_readout(state.current_page, state.total_pages),
        Style::default().fg(Color::White),
    )];
    if state.loading {
        readout.push(Span::styled(
            "  ⟳ Loading...",
            Style::default().fg(Color::Cyan),
        ));
    }
    if let Some(fetched) = state.last_fetched {
        readout.push(Span::styled(
            format!("  │ {}", freshness(fetched, Local::now())),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(readout)).alignment(Alignment::Center),
        chunks[1],
    );
}

/// "Page X of Y"
pub fn page_readout(current_page: u32, total_pages: u32) -> String {
    format!("Page {} of {}", current_page, total_pages)
}

/// A bracketed button, dimmed when disabled
fn button(label: &'static str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    };
    Span::styled(format!("[ {} ]", label), style)
}

/// Describes how long ago the page on screen was loaded
fn freshness(fetched: DateTime<Local>, now: DateTime<Local>) -> String {
    let elapsed = now - fetched;
    let mins_ago = elapsed.num_minutes();
    if mins_ago < 1 {
        "Data: just now".to_string()
    } else if mins_ago < 60 {
        format!("Data: {}m ago", mins_ago)
    } else {
        format!("Data: {}h ago", elapsed.num_hours())
    }
}
