//! Submitted data panel

use crate::state::{FieldName, SubmittedRecord};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the last submitted record
pub fn draw(frame: &mut Frame, area: Rect, record: &SubmittedRecord) {
    let mut lines = Vec::new();

    for field in FieldName::ALL {
        let value = record.fields.get(field);
        let mut value_lines = value.split('\n');
        let first = value_lines.next().unwrap_or_default();

        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", field.short_label()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(first.to_string()),
        ]));
        // Continuation lines of a multi-line address
        for rest in value_lines {
            lines.push(Line::from(format!("  {rest}")));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Submitted at {}", record.submitted_at.format("%H:%M:%S")),
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title(" Submitted Data ")
        .title_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
