//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod picker;
mod results;
mod widgets;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let submitted = app.state.form.submitted();
    let (form_area, results_area) = layout::create_layout(frame.area(), submitted.is_some());

    forms::draw_contact_form(frame, form_area, app);

    if let (Some(area), Some(record)) = (results_area, submitted) {
        results::draw(frame, area, record);
    }

    // Picker overlays the form
    if let Some(picker) = &app.state.picker {
        picker::draw(frame, app, picker);
    }

    layout::draw_status_bar(frame, app);
}
