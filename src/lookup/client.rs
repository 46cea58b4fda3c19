//! HTTP client for the country/state lookup service
//!
//! Talks to a CountriesNow-compatible API:
//! - `GET {base}/countries` returns `{ "data": [{ "country": "..." }] }`
//! - `GET {base}/countries/states/q?country=..` returns
//!   `{ "data": { "states": [{ "state_code": "..", "name": ".." }] } }`

use super::traits::LookupService;
use crate::state::{Country, StateEntry};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Default lookup service base URL
pub const DEFAULT_BASE_URL: &str = "https://countriesnow.space/api/v0.1";

/// Errors raised by a lookup request
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Invalid lookup URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Lookup service returned {0}")]
    Status(StatusCode),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct CountriesResponse {
    data: Vec<CountryRecord>,
}

#[derive(Debug, Deserialize)]
struct CountryRecord {
    country: String,
}

#[derive(Debug, Deserialize)]
struct StateRecord {
    #[serde(default)]
    state_code: Option<String>,
    name: String,
}

/// Client for the lookup service
#[derive(Debug, Clone)]
pub struct LookupClient {
    http: Client,
    base_url: Url,
}

impl LookupClient {
    /// Create a client rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self, LookupError> {
        // Url::join replaces the last segment unless the base ends in a slash
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| LookupError::InvalidUrl(format!("{base_url}: {e}")))?;

        let http = Client::builder()
            .user_agent(concat!("contact-form/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, LookupError> {
        self.base_url
            .join(path)
            .map_err(|e| LookupError::InvalidUrl(format!("{path}: {e}")))
    }

    /// GET a URL and return the body of a 2xx response
    async fn get_body(&self, url: Url) -> Result<Vec<u8>, LookupError> {
        tracing::debug!("GET {url}");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Extract `data.states` from a state lookup body
///
/// A missing or malformed collection yields an empty list. Entries that
/// do not decode are skipped.
fn parse_states(body: &Value) -> Vec<StateEntry> {
    let Some(states) = body
        .get("data")
        .and_then(|data| data.get("states"))
        .and_then(Value::as_array)
    else {
        tracing::debug!("State response has no data.states list");
        return Vec::new();
    };

    states
        .iter()
        .filter_map(|entry| match StateRecord::deserialize(entry) {
            Ok(record) => Some(StateEntry::new(
                record.state_code.unwrap_or_default(),
                record.name,
            )),
            Err(err) => {
                tracing::debug!("Skipping malformed state entry {entry}: {err}");
                None
            }
        })
        .collect()
}

#[async_trait]
impl LookupService for LookupClient {
    async fn fetch_countries(&self) -> Result<Vec<Country>, LookupError> {
        let url = self.endpoint("countries")?;
        let body = self.get_body(url).await?;
        let response: CountriesResponse = serde_json::from_slice(&body)?;

        Ok(response
            .data
            .into_iter()
            .map(|c| Country::new(c.country))
            .collect())
    }

    async fn fetch_states(&self, country: String) -> Result<Vec<StateEntry>, LookupError> {
        let mut url = self.endpoint("countries/states/q")?;
        url.query_pairs_mut().append_pair("country", &country);

        let body = self.get_body(url).await?;
        let value: Value = serde_json::from_slice(&body)?;
        Ok(parse_states(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> LookupClient {
        LookupClient::new(&format!("{}/api/v0.1", server.uri())).unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = LookupClient::new("https://countriesnow.space/api/v0.1").unwrap();
        assert_eq!(
            client.endpoint("countries").unwrap().as_str(),
            "https://countriesnow.space/api/v0.1/countries"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = LookupClient::new("not a url");
        assert!(matches!(result, Err(LookupError::InvalidUrl(_))));
    }

    #[test]
    fn test_parse_states_missing_data() {
        assert!(parse_states(&json!({ "error": true })).is_empty());
        assert!(parse_states(&json!({ "data": {} })).is_empty());
        assert!(parse_states(&json!({ "data": { "states": "none" } })).is_empty());
    }

    #[test]
    fn test_parse_states_keeps_entries_around_a_bad_one() {
        let parsed = parse_states(&json!({
            "data": {
                "states": [
                    { "name": "Provence", "state_code": "PACA" },
                    { "name": "Corsica", "state_code": null },
                    { "state_code": "XX" },
                    { "name": "Brittany" }
                ]
            }
        }));
        assert_eq!(
            parsed,
            vec![
                StateEntry::new("PACA", "Provence"),
                StateEntry::new("", "Corsica"),
                StateEntry::new("", "Brittany"),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_countries_keeps_service_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v0.1/countries"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": false,
                "data": [
                    { "iso2": "CA", "country": "Canada", "cities": [] },
                    { "iso2": "FR", "country": "France", "cities": [] }
                ]
            })))
            .mount(&server)
            .await;

        let countries = client_for(&server).fetch_countries().await.unwrap();
        assert_eq!(
            countries,
            vec![Country::new("Canada"), Country::new("France")]
        );
    }

    #[tokio::test]
    async fn test_fetch_countries_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v0.1/countries"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_countries().await;
        assert!(matches!(
            result,
            Err(LookupError::Status(status)) if status == StatusCode::SERVICE_UNAVAILABLE
        ));
    }

    #[tokio::test]
    async fn test_fetch_countries_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v0.1/countries"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_countries().await;
        assert!(matches!(result, Err(LookupError::Decode(_))));
    }

    #[tokio::test]
    async fn test_fetch_states_sends_country_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v0.1/countries/states/q"))
            .and(query_param("country", "France"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": false,
                "data": {
                    "name": "France",
                    "iso3": "FRA",
                    "states": [{ "name": "Provence", "state_code": "PACA" }]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let states = client_for(&server)
            .fetch_states("France".to_string())
            .await
            .unwrap();
        assert_eq!(states, vec![StateEntry::new("PACA", "Provence")]);
    }

    #[tokio::test]
    async fn test_fetch_states_encodes_country() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v0.1/countries/states/q"))
            .and(query_param("country", "Bosnia & Herzegovina"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "states": [] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let states = client_for(&server)
            .fetch_states("Bosnia & Herzegovina".to_string())
            .await
            .unwrap();
        assert!(states.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_states_missing_states_is_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v0.1/countries/states/q"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": true,
                "msg": "country not found"
            })))
            .mount(&server)
            .await;

        let states = client_for(&server)
            .fetch_states("Atlantis".to_string())
            .await
            .unwrap();
        assert!(states.is_empty());
    }
}
