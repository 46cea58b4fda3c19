//! Dropdown overlay for the country and state selects

use super::widgets::{centered_rect, render_scrollable_list};
use crate::app::App;
use crate::state::Picker;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

const PICKER_WIDTH: u16 = 44;
const PICKER_HEIGHT: u16 = 18;

/// Draw the open picker centered over the form
pub fn draw(frame: &mut Frame, app: &App, picker: &Picker) {
    let area = centered_rect(frame.area(), PICKER_WIDTH, PICKER_HEIGHT);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", picker.field.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Options
            Constraint::Length(1), // Filter
        ])
        .split(inner);

    let rows = app.picker_rows();
    let selected_index = rows.iter().position(|(_, selected)| *selected).unwrap_or(0);

    if rows.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No matches",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(empty, chunks[0]);
    } else {
        let items: Vec<ListItem> = rows
            .into_iter()
            .map(|(label, _)| ListItem::new(label))
            .collect();
        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("› ");
        render_scrollable_list(frame, chunks[0], list, selected_index);
    }

    let filter = Paragraph::new(Line::from(vec![
        Span::styled("Filter: ", Style::default().fg(Color::DarkGray)),
        Span::raw(picker.query.as_str()),
        Span::styled("▌", Style::default().fg(Color::Cyan)),
    ]));
    frame.render_widget(filter, chunks[1]);
}
