//! Application state module

mod app_state;
mod controller;
mod forms;
mod location;
mod picker;

pub use app_state::*;
pub use controller::*;
pub use forms::*;
pub use location::*;
pub use picker::*;
