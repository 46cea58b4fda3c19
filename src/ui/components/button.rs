//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a full-width action button
///
/// Selected buttons are filled with `color`; unselected ones are outlined.
pub fn render_action_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_selected: bool,
    color: Color,
) {
    let (border_style, text_style) = if is_selected {
        (
            Style::default().fg(color),
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Style::default().fg(color),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )
    };

    let paragraph = Paragraph::new(format!(" {label} "))
        .alignment(Alignment::Center)
        .style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}
