//! Layout components (content split, status bar)

use crate::app::App;
use crate::state::{FieldName, Focus, FormPhase, LoadStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Width of the submitted data panel
const RESULTS_WIDTH: u16 = 36;

/// Split the screen into the form and, when present, the results panel
pub fn create_layout(area: Rect, show_results: bool) -> (Rect, Option<Rect>) {
    // Reserve bottom line for status bar
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    if !show_results {
        return (rows[0], None);
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),                // Form
            Constraint::Length(RESULTS_WIDTH), // Submitted data
        ])
        .split(rows[0]);

    (columns[0], Some(columns[1]))
}

fn status_span(label: &str, status: LoadStatus, count: usize) -> Span<'static> {
    match status {
        LoadStatus::Idle => Span::styled(
            format!("{label}: -"),
            Style::default().fg(Color::Gray),
        ),
        LoadStatus::Loading => Span::styled(
            format!("{label}: loading…"),
            Style::default().fg(Color::Yellow),
        ),
        LoadStatus::Loaded => Span::styled(
            format!("{label}: {count}"),
            Style::default().fg(Color::Green),
        ),
        LoadStatus::Failed => Span::styled(
            format!("{label}: unavailable"),
            Style::default().fg(Color::Red),
        ),
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let form = &app.state.form;

    // Lookup service status
    let service_dot = match form.countries_status() {
        LoadStatus::Loaded => Span::styled(" ● ", Style::default().fg(Color::Green)),
        LoadStatus::Failed => Span::styled(" ○ ", Style::default().fg(Color::Red)),
        _ => Span::styled(" ◌ ", Style::default().fg(Color::Yellow)),
    };

    let mut spans = vec![
        service_dot,
        Span::styled(get_hints(app), Style::default().fg(Color::Black)),
        Span::raw(" | "),
        status_span(
            "countries",
            form.countries_status(),
            form.countries().len(),
        ),
        Span::raw(" "),
        status_span("states", form.states_status(), form.states().len()),
    ];

    match form.phase() {
        FormPhase::Invalid => {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("{} field(s) need attention", form.errors().len()),
                Style::default().fg(Color::Red),
            ));
        }
        FormPhase::Submitted => {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled("Submitted", Style::default().fg(Color::Green)));
        }
        FormPhase::Empty | FormPhase::Editing => {}
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Submit shortcut display for the status bar
const SUBMIT_SHORTCUT: &str = "^S:submit";

/// Get keyboard hints for the focused element
fn get_hints(app: &App) -> String {
    if app.state.picker.is_some() {
        return "type:filter  ↑/↓:move  Enter:choose  Esc:close".to_string();
    }
    match app.state.focus {
        Focus::SubmitButton => format!("Enter:submit  Tab:next  {SUBMIT_SHORTCUT}"),
        Focus::Field(FieldName::Address) => {
            format!("Tab:next  Enter:newline  {SUBMIT_SHORTCUT}  Esc:quit")
        }
        Focus::Field(field) if field.is_select() => {
            format!("Enter:choose  Tab:next  {SUBMIT_SHORTCUT}  Esc:quit")
        }
        Focus::Field(_) => format!("Tab:next  S-Tab:prev  {SUBMIT_SHORTCUT}  Esc:quit"),
    }
}
