//! Application state and core logic

use crate::lookup::LookupService;
use crate::state::{AppState, Command, FieldName, Focus, Message, PickerEntry};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Lookup service for country/state lists
    lookup: Arc<dyn LookupService>,
    /// Sender handed to lookup tasks
    results_tx: mpsc::UnboundedSender<Message>,
    /// Lookup results waiting to be applied
    results_rx: mpsc::UnboundedReceiver<Message>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(lookup: Arc<dyn LookupService>) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            lookup,
            results_tx,
            results_rx,
            quit: false,
        }
    }

    /// Kick off the one-time country lookup
    pub fn start(&mut self) {
        if let Some(command) = self.state.form.initialize() {
            self.run_command(command);
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Feed a message through the form controller and run its side effect
    pub fn dispatch(&mut self, message: Message) {
        if let Some(command) = self.state.form.update(message) {
            self.run_command(command);
        }
    }

    /// Apply every lookup result that has arrived since the last call
    ///
    /// Returns true if anything was applied.
    pub fn apply_lookup_results(&mut self) -> bool {
        let mut applied = false;
        while let Ok(message) = self.results_rx.try_recv() {
            self.dispatch(message);
            applied = true;
        }
        applied
    }

    /// Spawn a lookup task; its result comes back through the channel
    fn run_command(&self, command: Command) {
        let lookup = Arc::clone(&self.lookup);
        let tx = self.results_tx.clone();

        tokio::spawn(async move {
            let message = match command {
                Command::FetchCountries => {
                    Message::CountriesLoaded(lookup.fetch_countries().await)
                }
                Command::FetchStates {
                    country,
                    generation,
                } => Message::StatesLoaded {
                    generation,
                    result: lookup.fetch_states(country).await,
                },
            };
            // Receiver is gone only when the app is shutting down
            if tx.send(message).is_err() {
                tracing::debug!("Dropping lookup result after shutdown");
            }
        });
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.state.picker.is_some() {
            self.handle_picker_key(key);
            return;
        }

        let focused_field = self.state.focus.field();
        let on_submit = self.state.focus == Focus::SubmitButton;
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Down => self.state.next_focus(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_focus(),
            KeyCode::Enter if on_submit => self.submit(),
            KeyCode::Enter | KeyCode::Char(' ')
                if focused_field.is_some_and(|f| f.is_select()) =>
            {
                if let Some(field) = focused_field {
                    if !self.state.open_picker(field) {
                        tracing::debug!("{} select has no options", field.key());
                    }
                }
            }
            KeyCode::Enter => {
                // Enter in the address area adds newline
                if focused_field == Some(FieldName::Address) {
                    self.edit_focused(|value| value.push('\n'));
                }
            }
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.edit_focused(|value| value.push(c));
            }
            KeyCode::Backspace => {
                self.edit_focused(|value| {
                    value.pop();
                });
            }
            _ => {}
        }
    }

    /// Submit the form; on failure focus the first field needing attention
    fn submit(&mut self) {
        self.dispatch(Message::Submit);
        if let Some((field, _)) = self.state.form.errors().iter().next() {
            self.state.focus = Focus::Field(field);
        }
    }

    /// Apply an edit to the focused text field
    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(field) = self.state.focus.field() else {
            return;
        };
        if field.is_select() {
            return;
        }
        let mut value = self.state.form.fields().get(field).to_string();
        edit(&mut value);
        self.dispatch(Message::SetField(field, value));
    }

    /// Handle keys while a select picker is open
    fn handle_picker_key(&mut self, key: KeyEvent) {
        let Some(mut picker) = self.state.picker.take() else {
            return;
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let options = self.state.form.select_options(picker.field);

        match key.code {
            KeyCode::Esc => return,
            KeyCode::Enter => {
                let chosen = picker.chosen(&options).map(|e| e.value().to_string());
                match chosen {
                    Some(value) => self.choose(picker.field, value),
                    // Nothing matches the filter; keep the picker open
                    None => self.state.picker = Some(picker),
                }
                return;
            }
            KeyCode::Up => picker.move_up(&options),
            KeyCode::Down => picker.move_down(&options),
            KeyCode::Char('k') if ctrl => picker.move_up(&options),
            KeyCode::Char('j') if ctrl => picker.move_down(&options),
            KeyCode::Backspace => picker.pop_char(),
            KeyCode::Char(c) if !ctrl => picker.push_char(c),
            _ => {}
        }
        self.state.picker = Some(picker);
    }

    fn choose(&mut self, field: FieldName, value: String) {
        match field {
            FieldName::Country => {
                if value != self.state.form.fields().country {
                    self.dispatch(Message::SetCountry(value));
                }
            }
            other => self.dispatch(Message::SetField(other, value)),
        }
    }

    /// Rows of the open picker with their highlight flag
    pub fn picker_rows(&self) -> Vec<(String, bool)> {
        let Some(picker) = &self.state.picker else {
            return Vec::new();
        };
        let options = self.state.form.select_options(picker.field);
        picker
            .entries(&options)
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let label = match entry {
                    PickerEntry::Placeholder => picker.placeholder().to_string(),
                    PickerEntry::Option(value) => value.to_string(),
                };
                (label, idx == picker.selected)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{LookupError, MockLookupService};
    use crate::state::{Country, LoadStatus, StateEntry};
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    /// Wait for the next lookup result and apply it
    async fn settle(app: &mut App) {
        let message = tokio::time::timeout(Duration::from_secs(5), app.results_rx.recv())
            .await
            .expect("lookup result in time")
            .expect("channel open");
        app.dispatch(message);
    }

    fn mock_with_countries() -> MockLookupService {
        let mut mock = MockLookupService::new();
        mock.expect_fetch_countries()
            .times(1)
            .returning(|| Ok(vec![Country::new("Canada"), Country::new("France")]));
        mock
    }

    fn app_with(mock: MockLookupService) -> App {
        App::new(Arc::new(mock))
    }

    mod lookup_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_start_loads_countries() {
            let mut app = app_with(mock_with_countries());
            app.start();
            settle(&mut app).await;

            assert_eq!(app.state.form.countries_status(), LoadStatus::Loaded);
            assert_eq!(
                app.state.form.select_options(FieldName::Country),
                vec!["Canada", "France"]
            );
        }

        #[tokio::test]
        async fn test_start_only_fetches_once() {
            let mut app = app_with(mock_with_countries());
            app.start();
            app.start();
            settle(&mut app).await;
            assert!(!app.apply_lookup_results());
        }

        #[tokio::test]
        async fn test_country_failure_is_silent() {
            let mut mock = MockLookupService::new();
            mock.expect_fetch_countries()
                .times(1)
                .returning(|| Err(LookupError::Status(StatusCode::INTERNAL_SERVER_ERROR)));
            let mut app = app_with(mock);
            app.start();
            settle(&mut app).await;

            assert!(app.state.form.countries().is_empty());
            assert!(app.state.form.errors().is_empty());
            assert!(!app.should_quit());
        }

        #[tokio::test]
        async fn test_choosing_country_fetches_states() {
            let mut mock = mock_with_countries();
            mock.expect_fetch_states()
                .with(eq("France".to_string()))
                .times(1)
                .returning(|_| Ok(vec![StateEntry::new("PACA", "Provence")]));
            let mut app = app_with(mock);
            app.start();
            settle(&mut app).await;

            app.state.focus = Focus::Field(FieldName::Country);
            app.handle_key(key(KeyCode::Enter));
            type_text(&mut app, "fra");
            app.handle_key(key(KeyCode::Enter));

            assert!(app.state.picker.is_none());
            assert_eq!(app.state.form.fields().country, "France");
            assert_eq!(app.state.form.states_status(), LoadStatus::Loading);

            settle(&mut app).await;
            assert_eq!(
                app.state.form.select_options(FieldName::State),
                vec!["Provence"]
            );
        }

        #[tokio::test]
        async fn test_state_failure_leaves_select_disabled() {
            let mut mock = mock_with_countries();
            mock.expect_fetch_states()
                .returning(|_| Err(LookupError::Status(StatusCode::NOT_FOUND)));
            let mut app = app_with(mock);
            app.start();
            settle(&mut app).await;

            app.dispatch(Message::SetCountry("Canada".to_string()));
            settle(&mut app).await;

            assert_eq!(app.state.form.states_status(), LoadStatus::Failed);
            app.state.focus = Focus::Field(FieldName::State);
            app.handle_key(key(KeyCode::Enter));
            assert!(app.state.picker.is_none());
        }

        #[tokio::test]
        async fn test_rechoosing_same_country_does_not_refetch() {
            let mut mock = mock_with_countries();
            mock.expect_fetch_states()
                .times(1)
                .returning(|_| Ok(vec![StateEntry::new("PACA", "Provence")]));
            let mut app = app_with(mock);
            app.start();
            settle(&mut app).await;
            app.dispatch(Message::SetCountry("France".to_string()));
            settle(&mut app).await;

            app.state.focus = Focus::Field(FieldName::Country);
            app.handle_key(key(KeyCode::Enter));
            app.handle_key(key(KeyCode::Enter));

            assert_eq!(app.state.form.states().len(), 1);
        }
    }

    mod key_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_updates_focused_field_only() {
            let mut app = app_with(MockLookupService::new());
            type_text(&mut app, "Ada");
            app.handle_key(key(KeyCode::Backspace));

            assert_eq!(app.state.form.fields().name, "Ad");
            assert_eq!(app.state.form.fields().address, "");
        }

        #[test]
        fn test_enter_in_address_adds_newline() {
            let mut app = app_with(MockLookupService::new());
            app.handle_key(key(KeyCode::Tab));
            type_text(&mut app, "Row 1");
            app.handle_key(key(KeyCode::Enter));
            type_text(&mut app, "Paris");

            assert_eq!(app.state.form.fields().address, "Row 1\nParis");
        }

        #[test]
        fn test_typing_ignored_on_select_fields() {
            let mut app = app_with(MockLookupService::new());
            app.state.focus = Focus::Field(FieldName::Country);
            type_text(&mut app, "abc");
            assert_eq!(app.state.form.fields().country, "");
        }

        #[test]
        fn test_ctrl_s_submits_from_any_field() {
            let mut app = app_with(MockLookupService::new());
            type_text(&mut app, "Ada");
            app.handle_key(ctrl('s'));

            assert_eq!(app.state.form.errors().len(), 4);
            assert_eq!(app.state.form.fields().name, "Ada");
        }

        #[test]
        fn test_enter_on_submit_button() {
            let mut app = app_with(MockLookupService::new());
            app.state.focus = Focus::SubmitButton;
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.state.form.errors().len(), 5);
            assert_eq!(app.state.focus, Focus::Field(FieldName::Name));
        }

        #[test]
        fn test_failed_submit_focuses_first_invalid_field() {
            let mut app = app_with(MockLookupService::new());
            type_text(&mut app, "Ada");
            app.handle_key(key(KeyCode::Tab));
            type_text(&mut app, "12 Analytical Row");
            app.state.focus = Focus::SubmitButton;
            app.handle_key(key(KeyCode::Enter));

            assert_eq!(app.state.focus, Focus::Field(FieldName::Phone));
        }

        #[test]
        fn test_escape_quits_outside_picker() {
            let mut app = app_with(MockLookupService::new());
            app.handle_key(key(KeyCode::Esc));
            assert!(app.should_quit());
        }

        #[test]
        fn test_escape_closes_picker_without_quitting() {
            let mut app = app_with(MockLookupService::new());
            app.dispatch(Message::CountriesLoaded(Ok(vec![Country::new("Canada")])));
            app.state.focus = Focus::Field(FieldName::Country);
            app.handle_key(key(KeyCode::Char(' ')));
            assert!(app.state.picker.is_some());

            app.handle_key(key(KeyCode::Esc));
            assert!(app.state.picker.is_none());
            assert!(!app.should_quit());
        }

        #[test]
        fn test_picker_rows_mark_selection() {
            let mut app = app_with(MockLookupService::new());
            app.dispatch(Message::CountriesLoaded(Ok(vec![
                Country::new("Canada"),
                Country::new("France"),
            ])));
            app.state.focus = Focus::Field(FieldName::Country);
            app.handle_key(key(KeyCode::Enter));
            app.handle_key(ctrl('j'));

            assert_eq!(
                app.picker_rows(),
                vec![
                    ("Select a country".to_string(), false),
                    ("Canada".to_string(), true),
                    ("France".to_string(), false),
                ]
            );
        }

        #[test]
        fn test_picker_enter_without_match_stays_open() {
            let mut app = app_with(MockLookupService::new());
            app.dispatch(Message::CountriesLoaded(Ok(vec![Country::new("Canada")])));
            app.state.focus = Focus::Field(FieldName::Country);
            app.handle_key(key(KeyCode::Enter));
            type_text(&mut app, "zz");
            app.handle_key(key(KeyCode::Enter));

            assert!(app.state.picker.is_some());
            assert_eq!(app.state.form.fields().country, "");
        }
    }

    #[tokio::test]
    async fn test_full_keyboard_scenario() {
        let mut mock = mock_with_countries();
        mock.expect_fetch_states()
            .with(eq("France".to_string()))
            .returning(|_| Ok(vec![StateEntry::new("PACA", "Provence")]));
        let mut app = app_with(mock);
        app.start();
        settle(&mut app).await;

        type_text(&mut app, "Ada Lovelace");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "12 Analytical Row");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "555-0100");
        app.handle_key(key(KeyCode::Tab));

        // Country picker: placeholder, Canada, France
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        settle(&mut app).await;

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));

        let record = app.state.form.submitted().expect("submitted");
        assert_eq!(record.fields.name, "Ada Lovelace");
        assert_eq!(record.fields.country, "France");
        assert_eq!(record.fields.state, "Provence");
        assert!(app.state.form.fields().is_empty());
        assert!(app.state.form.states().is_empty());
        assert!(app.state.form.errors().is_empty());
    }
}
