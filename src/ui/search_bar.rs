//! Search bar rendering
//!
//! Shows the text being typed, a placeholder when it is empty, and the
//! query whose results are currently on screen.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, InputMode};

/// Placeholder shown in an empty search field
const PLACEHOLDER: &str = "Search...";

/// Renders the search field
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.mode == InputMode::Search;

    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = Line::from(vec![
        Span::styled(
            " PHOTOGRID ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("Search: {} ", app.controller.state().query),
            Style::default().fg(Color::White),
        ),
    ]);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut spans = vec![Span::styled("🔍 ", Style::default().fg(Color::Gray))];
    if app.search_input.is_empty() && !editing {
        spans.push(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::raw(app.search_input.clone()));
    }
    if editing {
        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
