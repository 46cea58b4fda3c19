//! Lookup service module for country/state reference data

mod client;
mod traits;

pub use client::{LookupClient, LookupError, DEFAULT_BASE_URL};
pub use traits::LookupService;

#[cfg(test)]
pub use traits::MockLookupService;
