//! Contact form rendering

use super::field_renderer::{draw_field, FieldView, ERROR_LINE_HEIGHT};
use crate::app::App;
use crate::state::{FieldName, Focus};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Rows for one field: bordered input plus its error line
fn field_height(field: FieldName) -> u16 {
    // Address is a three-row text area
    let input = if field.is_multiline() { 5 } else { 3 };
    input + ERROR_LINE_HEIGHT
}

fn placeholder(field: FieldName) -> Option<&'static str> {
    match field {
        FieldName::Country => Some("Select a country"),
        FieldName::State => Some("Select a state"),
        _ => None,
    }
}

/// Draw the contact form with its submit button
pub fn draw_contact_form(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Contact Form ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = FieldName::ALL
        .iter()
        .map(|f| Constraint::Length(field_height(*f)))
        .collect();
    constraints.push(Constraint::Length(BUTTON_HEIGHT)); // Submit
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    let form = &app.state.form;
    for (idx, field) in FieldName::ALL.iter().enumerate() {
        let view = FieldView {
            label: field.label(),
            value: form.fields().get(*field),
            placeholder: placeholder(*field),
            is_active: app.state.is_focused(*field),
            is_multiline: field.is_multiline(),
            is_select: field.is_select(),
            is_enabled: form.is_field_enabled(*field),
            error: form.errors().get(*field),
        };
        draw_field(frame, chunks[idx], &view);
    }

    render_action_button(
        frame,
        chunks[FieldName::ALL.len()],
        "Submit",
        app.state.focus == Focus::SubmitButton,
        Color::Yellow,
    );
}
