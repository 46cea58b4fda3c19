//! Option picker for the country and state selects

use super::forms::FieldName;

/// One row of an open picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEntry<'a> {
    /// The "Select a ..." row, choosing it clears the field
    Placeholder,
    Option(&'a str),
}

impl PickerEntry<'_> {
    /// Value written to the field when this row is chosen
    pub fn value(&self) -> &str {
        match self {
            PickerEntry::Placeholder => "",
            PickerEntry::Option(value) => value,
        }
    }
}

/// Open dropdown for a select field
///
/// Options are owned by the form controller; the picker only keeps the
/// filter text and the highlighted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picker {
    pub field: FieldName,
    pub query: String,
    pub selected: usize,
}

impl Picker {
    /// Open a picker with the current value highlighted
    pub fn open(field: FieldName, current: &str, options: &[&str]) -> Self {
        let selected = options
            .iter()
            .position(|o| *o == current)
            .map(|i| i + 1)
            .unwrap_or(0);
        Self {
            field,
            query: String::new(),
            selected,
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self.field {
            FieldName::Country => "Select a country",
            _ => "Select a state",
        }
    }

    /// Rows visible under the current filter
    ///
    /// The placeholder row is only offered while the filter is empty.
    pub fn entries<'a>(&self, options: &[&'a str]) -> Vec<PickerEntry<'a>> {
        if self.query.is_empty() {
            return std::iter::once(PickerEntry::Placeholder)
                .chain(options.iter().map(|o| PickerEntry::Option(*o)))
                .collect();
        }

        let needle = self.query.to_lowercase();
        options
            .iter()
            .filter(|o| o.to_lowercase().contains(&needle))
            .map(|o| PickerEntry::Option(*o))
            .collect()
    }

    /// The highlighted row, if the filter left anything to choose
    pub fn chosen<'a>(&self, options: &[&'a str]) -> Option<PickerEntry<'a>> {
        self.entries(options).get(self.selected).copied()
    }

    pub fn move_down(&mut self, options: &[&str]) {
        let len = self.entries(options).len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn move_up(&mut self, options: &[&str]) {
        let len = self.entries(options).len();
        if len == 0 {
            return;
        }
        if self.selected == 0 {
            self.selected = len - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.selected = 0;
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.selected = 0;
    }
}
