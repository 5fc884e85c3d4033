//! Help overlay listing the keybindings of each input mode

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

const OVERLAY_WIDTH: u16 = 50;

/// Width of the key column
const KEY_COLUMN: usize = 10;

/// Key groups shown in the overlay, in display order
const KEY_GROUPS: &[(&str, &[(&str, &str)])] = &[
    (
        "Search",
        &[
            ("/ s", "edit the search field"),
            ("Enter", "submit search or page number"),
            ("Esc", "stop editing"),
        ],
    ),
    (
        "Pages",
        &[
            ("→ l n", "next page"),
            ("← h p", "previous page"),
            ("g", "go to page number"),
        ],
    ),
    (
        "Images",
        &[
            ("↑ k ↓ j", "move selection"),
            ("o Enter", "open image in browser"),
        ],
    ),
    (
        "Other",
        &[("?", "toggle this help"), ("q", "quit")],
    ),
];

/// Renders the help overlay on top of whatever is on screen
pub fn render(frame: &mut Frame) {
    let lines = help_lines();
    // Content plus top and bottom border
    let height = lines.len() as u16 + 2;
    let area = overlay_area(frame.area(), OVERLAY_WIDTH, height);

    let block = Block::default()
        .title(Line::from(" Keyboard Shortcuts ").centered())
        .title_bottom(Line::from(" Esc or ? to close ").centered())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn help_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, (group, keys)) in KEY_GROUPS.iter().enumerate() {
        if index > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            *group,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        )));
        lines.extend(keys.iter().map(|(key, action)| key_row(key, action)));
    }
    lines
}

fn key_row(key: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {:>width$} ", key, width = KEY_COLUMN),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(action, Style::default().fg(Color::Gray)),
    ])
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
fn overlay_area(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [overlay] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    overlay
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::render_to_string;

    #[test]
    fn test_help_overlay_renders() {
        let content = render_to_string(80, 24, render);

        assert!(content.contains("Keyboard Shortcuts"));
        assert!(content.contains("Pages"));
        assert!(content.contains("go to page number"));
        assert!(content.contains("Esc or ? to close"));
    }

    #[test]
    fn test_every_key_group_fits_default_terminal() {
        // Two lines of border on a 24-row terminal
        assert!(help_lines().len() <= 22);
    }

    #[test]
    fn test_overlay_area_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(overlay_area(area, 50, 20), Rect::new(15, 2, 50, 20));

        let small = Rect::new(0, 0, 30, 10);
        assert_eq!(overlay_area(small, 50, 20), small);
    }
}
