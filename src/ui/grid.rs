//! Result grid rendering
//!
//! Lays the current page out as a grid of cards, one per image, showing the
//! photographer, the caption and the thumbnail URL.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::ImageResult;

/// Cards per row
pub const GRID_COLUMNS: usize = 4;

/// Shown when a search finished with no results
pub const EMPTY_MESSAGE: &str = "No results found. Try another search.";

/// Renders the card grid, or the empty/loading message
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.controller.state();

    if state.is_empty_result() {
        render_message(frame, area, EMPTY_MESSAGE, Color::White);
        return;
    }

    if !state.has_fetched_once {
        let message = if state.loading {
            "Loading images..."
        } else {
            "Nothing to show yet"
        };
        render_message(frame, area, message, Color::Cyan);
        return;
    }

    let rows = row_count(state.results.len());
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    for (row_index, row_area) in row_areas.iter().enumerate() {
        let column_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(*row_area);

        for (column_index, card_area) in column_areas.iter().enumerate() {
            let index = row_index * GRID_COLUMNS + column_index;
            if let Some(image) = state.results.get(index) {
                render_card(frame, image, index == app.selected_index, *card_area);
            }
        }
    }
}

/// Number of grid rows needed for `count` cards
fn row_count(count: usize) -> usize {
    count.div_ceil(GRID_COLUMNS).max(1)
}

/// Renders one card
fn render_card(frame: &mut Frame, image: &ImageResult, selected: bool, area: Rect) {
    let border_style = if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(format!(" By: {} ", image.author_name))
        .borders(Borders::ALL)
        .border_style(border_style);

    let caption = image.caption().unwrap_or("No description");
    let lines = vec![
        Line::from(Span::styled(
            caption.to_string(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            image.thumbnail_url.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Renders a centered one-line message
fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Percentage(45),
        ])
        .split(area);

    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, chunks[1]);
}
