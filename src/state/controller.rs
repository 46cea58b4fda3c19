//! Form view-model
//!
//! [`FormController`] owns every piece of form state and is driven by
//! [`Message`]s through [`FormController::update`]. It never performs IO:
//! lookups are requested by returning a [`Command`] that the application
//! runtime executes, and their results come back as messages.

use super::forms::{validate, FieldName, FormFields, ValidationErrors};
use super::location::{Country, StateEntry};
use crate::lookup::LookupError;
use chrono::{DateTime, Local};

/// Tag carried by a state lookup so late responses can be recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestGeneration(u64);

impl RequestGeneration {
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Events that change form state
#[derive(Debug)]
pub enum Message {
    SetField(FieldName, String),
    SetCountry(String),
    Submit,
    CountriesLoaded(Result<Vec<Country>, LookupError>),
    StatesLoaded {
        generation: RequestGeneration,
        result: Result<Vec<StateEntry>, LookupError>,
    },
}

/// Side effects requested by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchCountries,
    FetchStates {
        country: String,
        generation: RequestGeneration,
    },
}

/// Loading state of a lookup list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Lifecycle of the form as seen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Nothing entered yet
    Empty,
    /// At least one field holds a value
    Editing,
    /// Last submit attempt failed; errors are shown
    Invalid,
    /// Last submit succeeded; the record is shown and the form is empty
    Submitted,
}

/// Snapshot of the form taken at a successful submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedRecord {
    pub fields: FormFields,
    pub submitted_at: DateTime<Local>,
}

/// View-model for the contact form
#[derive(Debug, Default)]
pub struct FormController {
    fields: FormFields,
    countries: Vec<Country>,
    states: Vec<StateEntry>,
    errors: ValidationErrors,
    submitted: Option<SubmittedRecord>,
    countries_status: LoadStatus,
    states_status: LoadStatus,
    initialized: bool,
    generation: RequestGeneration,
}

impl FormController {
    /// Request the country list
    ///
    /// Only the first call yields a command; countries are never refreshed.
    pub fn initialize(&mut self) -> Option<Command> {
        if self.initialized {
            return None;
        }
        self.initialized = true;
        self.countries_status = LoadStatus::Loading;
        Some(Command::FetchCountries)
    }

    /// Apply a message and return the side effect it requires, if any
    pub fn update(&mut self, message: Message) -> Option<Command> {
        match message {
            // Country edits always go through the cascading path
            Message::SetField(FieldName::Country, value) | Message::SetCountry(value) => {
                self.set_country(value)
            }
            Message::SetField(field, value) => {
                self.set_field(field, value);
                None
            }
            Message::Submit => {
                self.submit();
                None
            }
            Message::CountriesLoaded(result) => {
                self.apply_countries(result);
                None
            }
            Message::StatesLoaded { generation, result } => {
                self.apply_states(generation, result);
                None
            }
        }
    }

    /// Update exactly one field; never validates
    pub fn set_field(&mut self, field: FieldName, value: impl Into<String>) {
        self.fields.set(field, value);
    }

    /// Select a country, resetting the dependent state selection
    ///
    /// The state value and list are cleared before any lookup is issued, so
    /// the old country's states are never shown against the new country.
    pub fn set_country(&mut self, value: impl Into<String>) -> Option<Command> {
        let country = value.into();
        self.fields.country = country.clone();
        self.fields.state.clear();
        self.states.clear();
        self.generation = self.generation.next();

        if country.is_empty() {
            self.states_status = LoadStatus::Idle;
            return None;
        }

        self.states_status = LoadStatus::Loading;
        tracing::debug!("Requesting states for {country} ({:?})", self.generation);
        Some(Command::FetchStates {
            country,
            generation: self.generation,
        })
    }

    /// Run presence checks without touching any field
    pub fn validate(&self) -> (ValidationErrors, bool) {
        let errors = validate(&self.fields);
        let is_valid = errors.is_empty();
        (errors, is_valid)
    }

    /// Validate and, when valid, snapshot and reset the form
    ///
    /// Returns true when a record was taken.
    pub fn submit(&mut self) -> bool {
        let (errors, is_valid) = self.validate();
        if !is_valid {
            tracing::debug!("Submit blocked by {} validation error(s)", errors.len());
            self.errors = errors;
            return false;
        }

        self.submitted = Some(SubmittedRecord {
            fields: std::mem::take(&mut self.fields),
            submitted_at: Local::now(),
        });
        self.states.clear();
        self.states_status = LoadStatus::Idle;
        // Responses for the old country must not repopulate the reset form
        self.generation = self.generation.next();
        self.errors = ValidationErrors::default();
        tracing::info!("Contact form submitted");
        true
    }

    fn apply_countries(&mut self, result: Result<Vec<Country>, LookupError>) {
        match result {
            Ok(countries) => {
                tracing::info!("Loaded {} countries", countries.len());
                self.countries = countries;
                self.countries_status = LoadStatus::Loaded;
            }
            Err(err) => {
                tracing::warn!("Error fetching countries: {err}");
                self.countries.clear();
                self.countries_status = LoadStatus::Failed;
            }
        }
    }

    fn apply_states(
        &mut self,
        generation: RequestGeneration,
        result: Result<Vec<StateEntry>, LookupError>,
    ) {
        if generation != self.generation {
            tracing::debug!(
                "Discarding stale state response {:?} (latest {:?})",
                generation,
                self.generation
            );
            return;
        }

        match result {
            Ok(states) => {
                tracing::info!(
                    "Loaded {} states for {}",
                    states.len(),
                    self.fields.country
                );
                self.states = states;
                self.states_status = LoadStatus::Loaded;
            }
            Err(err) => {
                tracing::warn!("Error fetching states for {}: {err}", self.fields.country);
                self.states.clear();
                self.states_status = LoadStatus::Failed;
            }
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn states(&self) -> &[StateEntry] {
        &self.states
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn submitted(&self) -> Option<&SubmittedRecord> {
        self.submitted.as_ref()
    }

    pub fn countries_status(&self) -> LoadStatus {
        self.countries_status
    }

    pub fn states_status(&self) -> LoadStatus {
        self.states_status
    }

    /// Selectable values for a select field, in service order
    pub fn select_options(&self, field: FieldName) -> Vec<&str> {
        match field {
            FieldName::Country => self.countries.iter().map(|c| c.name.as_str()).collect(),
            FieldName::State => self.states.iter().map(|s| s.name.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// The state select is disabled while there is nothing to choose
    pub fn is_field_enabled(&self, field: FieldName) -> bool {
        match field {
            FieldName::State => !self.states.is_empty(),
            _ => true,
        }
    }

    pub fn phase(&self) -> FormPhase {
        if !self.errors.is_empty() {
            FormPhase::Invalid
        } else if !self.fields.is_empty() {
            FormPhase::Editing
        } else if self.submitted.is_some() {
            FormPhase::Submitted
        } else {
            FormPhase::Empty
        }
    }
}
