//! Application state definitions

use super::controller::FormController;
use super::forms::FieldName;
use super::picker::Picker;

/// Focusable element of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FieldName),
    SubmitButton,
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Field(FieldName::Name)
    }
}

impl Focus {
    /// Focus order: the five fields, then the submit button
    const ORDER: [Focus; 6] = [
        Focus::Field(FieldName::Name),
        Focus::Field(FieldName::Address),
        Focus::Field(FieldName::Phone),
        Focus::Field(FieldName::Country),
        Focus::Field(FieldName::State),
        Focus::SubmitButton,
    ];

    fn position(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(&self) -> Self {
        let pos = self.position();
        if pos == 0 {
            Self::ORDER[Self::ORDER.len() - 1]
        } else {
            Self::ORDER[pos - 1]
        }
    }

    /// The focused field, if focus is not on the submit button
    pub fn field(&self) -> Option<FieldName> {
        match self {
            Focus::Field(field) => Some(*field),
            Focus::SubmitButton => None,
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Form view-model
    pub form: FormController,
    /// Focused element
    pub focus: Focus,
    /// Open select dropdown, if any
    pub picker: Option<Picker>,
}

impl AppState {
    /// Move to next form element
    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Move to previous form element
    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn is_focused(&self, field: FieldName) -> bool {
        self.focus == Focus::Field(field)
    }

    /// Open the picker for a select field
    ///
    /// Returns false when the field is not a select or is disabled.
    pub fn open_picker(&mut self, field: FieldName) -> bool {
        if !field.is_select() || !self.form.is_field_enabled(field) {
            return false;
        }
        let options = self.form.select_options(field);
        let picker = Picker::open(field, self.form.fields().get(field), &options);
        self.picker = Some(picker);
        true
    }
}
