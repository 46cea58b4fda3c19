//! Country and state reference data

/// A country offered by the lookup service
///
/// The name doubles as display label and as the key for the state lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub name: String,
}

impl Country {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A state (or region) of the currently selected country
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEntry {
    pub code: String,
    pub name: String,
}

impl StateEntry {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}
