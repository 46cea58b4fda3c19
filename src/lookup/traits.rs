//! Trait abstraction for the lookup service to enable mocking in tests

use super::client::LookupError;
use crate::state::{Country, StateEntry};
use async_trait::async_trait;

/// Source of country and state reference data
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LookupService: Send + Sync {
    /// Fetch every country, in the order the service returns them
    async fn fetch_countries(&self) -> Result<Vec<Country>, LookupError>;

    /// Fetch the states of one country
    async fn fetch_states(&self, country: String) -> Result<Vec<StateEntry>, LookupError>;
}
