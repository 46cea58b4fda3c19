//! Form field identity and values

/// The five inputs of the contact form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    Name,
    Address,
    Phone,
    Country,
    State,
}

impl FieldName {
    /// All fields in display order
    pub const ALL: [FieldName; 5] = [
        FieldName::Name,
        FieldName::Address,
        FieldName::Phone,
        FieldName::Country,
        FieldName::State,
    ];

    /// Stable key used in logs and error maps
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Address => "address",
            Self::Phone => "phone",
            Self::Country => "country",
            Self::State => "state",
        }
    }

    /// Label shown above the input
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Address => "Address",
            Self::Phone => "Phone Number",
            Self::Country => "Country",
            Self::State => "State",
        }
    }

    /// Label used in the submitted data panel
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Phone => "Phone",
            other => other.label(),
        }
    }

    /// Message reported when the field is left empty
    pub fn required_message(&self) -> &'static str {
        match self {
            Self::Name => "Name is required",
            Self::Address => "Address is required",
            Self::Phone => "Phone number is required",
            Self::Country => "Country is required",
            Self::State => "State is required",
        }
    }

    /// Country and state are chosen from lookup lists rather than typed
    pub fn is_select(&self) -> bool {
        matches!(self, Self::Country | Self::State)
    }

    /// Address is a three-row text area
    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::Address)
    }
}

/// Live, editable values of the contact form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub country: String,
    pub state: String,
}

impl FormFields {
    /// Get the value of a field
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => &self.name,
            FieldName::Address => &self.address,
            FieldName::Phone => &self.phone,
            FieldName::Country => &self.country,
            FieldName::State => &self.state,
        }
    }

    /// Replace the value of exactly one field
    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        let slot = match field {
            FieldName::Name => &mut self.name,
            FieldName::Address => &mut self.address,
            FieldName::Phone => &mut self.phone,
            FieldName::Country => &mut self.country,
            FieldName::State => &mut self.state,
        };
        *slot = value.into();
    }

    /// True when every field is the empty string
    pub fn is_empty(&self) -> bool {
        FieldName::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}
