//! Form rendering module
//!
//! - `field_renderer`: labeled inputs with inline errors
//! - `contact_form`: the contact form itself

mod contact_form;
mod field_renderer;

pub use contact_form::draw_contact_form;
