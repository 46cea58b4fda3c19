//! Form domain layer
//!
//! Field identity, field values and the presence checks run on submit.

mod field;
mod validation;

pub use field::{FieldName, FormFields};
pub use validation::{validate, ValidationErrors};
