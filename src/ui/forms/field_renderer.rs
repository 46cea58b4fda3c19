//! Field rendering utilities for forms

use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by the inline error line under each field
pub const ERROR_LINE_HEIGHT: u16 = 1;

/// Everything needed to draw one labeled input
pub struct FieldView<'a> {
    /// Label in the input border
    pub label: &'a str,
    /// Current value
    pub value: &'a str,
    /// Text shown when the value is empty (select fields)
    pub placeholder: Option<&'a str>,
    pub is_active: bool,
    pub is_multiline: bool,
    /// Select fields show a dropdown marker
    pub is_select: bool,
    pub is_enabled: bool,
    /// Inline validation error shown below the input
    pub error: Option<&'a str>,
}

fn border_style(view: &FieldView) -> Style {
    if view.error.is_some() {
        Style::default().fg(Color::Red)
    } else if view.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Split text into display rows, hard-wrapping at `width` columns
fn wrap_rows(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            rows.push(String::new());
            continue;
        }
        rows.extend(chars.chunks(width).map(|chunk| chunk.iter().collect()));
    }
    rows
}

/// Vertical scroll that keeps the last row of a text area visible
fn last_rows_offset(row_count: usize, visible: u16) -> u16 {
    let hidden = row_count.saturating_sub(usize::from(visible));
    u16::try_from(hidden).unwrap_or(u16::MAX)
}

/// Draw a labeled input with its inline error line
///
/// The last row of `area` is reserved for the error message.
pub fn draw_field(frame: &mut Frame, area: Rect, view: &FieldView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),                    // Input
            Constraint::Length(ERROR_LINE_HEIGHT), // Error
        ])
        .split(area);

    let value_style = if !view.is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if view.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let (display_value, style) = match view.placeholder {
        Some(placeholder) if view.value.is_empty() => {
            (placeholder, Style::default().fg(Color::DarkGray))
        }
        _ => (view.value, value_style),
    };

    // Text inputs show a cursor; selects show a dropdown marker
    let cursor = if view.is_active && !view.is_select {
        "▌"
    } else {
        ""
    };

    let content = if view.is_multiline {
        let inner = chunks[0].inner(Margin::new(1, 1));
        let mut rows = wrap_rows(display_value, inner.width);
        // A full last row leaves no room for the cursor
        let last_row_full =
            rows.last().map(|r| r.chars().count()) == Some(usize::from(inner.width));
        if !cursor.is_empty() && last_row_full {
            rows.push(String::new());
        }
        let scroll = last_rows_offset(rows.len(), inner.height);

        let mut lines: Vec<Line> = rows
            .into_iter()
            .map(|row| Line::from(Span::styled(row, style)))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
        }
        Paragraph::new(lines).scroll((scroll, 0))
    } else {
        let mut spans = vec![
            Span::styled(display_value, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ];
        if view.is_select {
            spans.push(Span::styled(" ▾", border_style(view)));
        }
        Paragraph::new(Line::from(spans)).wrap(Wrap { trim: false })
    };

    let title = if view.is_enabled {
        format!(" {} ", view.label)
    } else {
        format!(" {} (unavailable) ", view.label)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(view));

    frame.render_widget(content.block(block), chunks[0]);

    if let Some(error) = view.error {
        let error_line = Paragraph::new(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        ));
        frame.render_widget(error_line, chunks[1]);
    }
}
