//! SeePlaces HTTP client.
//!
//! Blocking GET calls against the SeePlaces API. Every request carries the
//! configured `api-version` query parameter and `accept: application/json`;
//! callers can override either by passing the same key.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, info};

use crate::config::SeePlacesOptions;
use crate::domain::{Excursion, IataCode};

use super::error::SeePlacesError;
use super::types::{SpokenLanguage, parse_excursions, parse_spoken_languages};

/// Path of the spoken languages endpoint, relative to the base URL.
pub const SPOKEN_LANGUAGES_ENDPOINT: &str = "api/Excursion/ExcursionSpokenLanguages";

/// Path of the excursions endpoint, relative to the base URL.
pub const EXCURSIONS_ENDPOINT: &str = "api/Excursion/ExcursionForIataCode";

/// How much of an unparseable body to keep in the error.
const BODY_SNIPPET_CHARS: usize = 500;

/// SeePlaces API client.
///
/// Holds no mutable state: each call is an independent blocking round-trip
/// under the configured timeout, without retries.
#[derive(Debug, Clone)]
pub struct SeePlacesClient {
    http: Client,
    options: SeePlacesOptions,
}

impl SeePlacesClient {
    /// Create a new client with the given options.
    pub fn new(options: SeePlacesOptions) -> Result<Self, SeePlacesError> {
        let http = Client::builder()
            .timeout(options.timeout())
            .build()
            .map_err(SeePlacesError::Client)?;

        Ok(Self { http, options })
    }

    pub fn options(&self) -> &SeePlacesOptions {
        &self.options
    }

    /// Generic GET call against `endpoint`.
    ///
    /// `query` may repeat a key to send a set of values. Keys in `query` and
    /// `headers` replace the defaults of the same name. A non-2xx status is
    /// returned as [`SeePlacesError::ApiConnection`]; otherwise the response
    /// is handed back untouched.
    pub fn call_api(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<Response, SeePlacesError> {
        let url = self
            .options
            .base_url()
            .join(endpoint)
            .map_err(|e| SeePlacesError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        let query = merge_query(&[("api-version", self.options.api_version())], query);
        let headers = build_headers(headers)?;

        info!(endpoint, "calling SeePlaces API");

        let response = self
            .http
            .get(url)
            .query(&query)
            .headers(headers)
            .send()
            .map_err(|source| SeePlacesError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        response
            .error_for_status()
            .map_err(|source| SeePlacesError::ApiConnection {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                source,
            })
    }

    /// Raw response of the `ExcursionSpokenLanguages` call.
    pub fn call_excursion_spoken_languages(&self) -> Result<Response, SeePlacesError> {
        // Customers never see this response, so English is fine.
        self.call_api(SPOKEN_LANGUAGES_ENDPOINT, &[], &[("accept-language", "en-US")])
    }

    /// Raw response of the `ExcursionForIataCode` call.
    pub fn call_excursion_for_iata_code(
        &self,
        iata_code: &IataCode,
        date_from: NaiveDate,
        date_to: NaiveDate,
        language_ids: &BTreeSet<String>,
    ) -> Result<Response, SeePlacesError> {
        let date_from = date_from.format("%Y-%m-%d").to_string();
        let date_to = date_to.format("%Y-%m-%d").to_string();

        let mut query = vec![
            ("input.iataCodes", iata_code.as_str()),
            ("input.dateFrom", date_from.as_str()),
            ("input.dateTo", date_to.as_str()),
        ];
        query.extend(
            language_ids
                .iter()
                .map(|id| ("input.spokenLanguages", id.as_str())),
        );

        // Customers read this response, so it has to be in Slovak.
        let mut headers = vec![("currency", "EUR"), ("accept-language", "sk-SK")];
        if let Some(scope_id) = self.options.scope_id() {
            headers.push(("x-scope-id", scope_id));
        }

        self.call_api(EXCURSIONS_ENDPOINT, &query, &headers)
    }

    /// Fetch and parse every spoken language the backend knows.
    pub fn fetch_spoken_languages(&self) -> Result<Vec<SpokenLanguage>, SeePlacesError> {
        let response = self.call_excursion_spoken_languages()?;
        let languages = read_body(SPOKEN_LANGUAGES_ENDPOINT, response, parse_spoken_languages)?;
        debug!(count = languages.len(), "parsed spoken languages");
        Ok(languages)
    }

    /// Fetch and parse excursions for already resolved language ids.
    pub fn fetch_excursions(
        &self,
        iata_code: &IataCode,
        date_from: NaiveDate,
        date_to: NaiveDate,
        language_ids: &BTreeSet<String>,
    ) -> Result<Vec<Excursion>, SeePlacesError> {
        let response =
            self.call_excursion_for_iata_code(iata_code, date_from, date_to, language_ids)?;
        let items = read_body(EXCURSIONS_ENDPOINT, response, parse_excursions)?;
        debug!(count = items.len(), %iata_code, "parsed excursions");
        Ok(items)
    }
}

/// Read a response body and parse it, keeping a snippet of the body on failure.
fn read_body<T>(
    endpoint: &str,
    response: Response,
    parse: impl FnOnce(&str) -> Result<T, serde_json::Error>,
) -> Result<T, SeePlacesError> {
    let body = response.text().map_err(|source| SeePlacesError::Transport {
        endpoint: endpoint.to_string(),
        source,
    })?;

    parse(&body).map_err(|e| SeePlacesError::Json {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
        body: Some(body.chars().take(BODY_SNIPPET_CHARS).collect()),
    })
}

/// Defaults whose key appears in `overrides` are dropped, then all overrides
/// are appended in order.
fn merge_query<'a>(
    defaults: &[(&'a str, &'a str)],
    overrides: &[(&'a str, &'a str)],
) -> Vec<(&'a str, &'a str)> {
    let mut merged: Vec<(&str, &str)> = defaults
        .iter()
        .filter(|(key, _)| !overrides.iter().any(|(other, _)| other == key))
        .copied()
        .collect();
    merged.extend_from_slice(overrides);
    merged
}

/// Default headers with `extra` inserted on top.
fn build_headers(extra: &[(&str, &str)]) -> Result<HeaderMap, SeePlacesError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    for (name, value) in extra {
        let invalid = || SeePlacesError::InvalidHeader {
            name: name.to_string(),
        };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let options = SeePlacesOptions::new("https://www.example.com/", "1.0").unwrap();
        let client = SeePlacesClient::new(options).unwrap();
        assert_eq!(client.options().api_version(), "1.0");
    }

    #[test]
    fn query_keeps_defaults() {
        let merged = merge_query(&[("api-version", "1.0")], &[("input.iataCodes", "BTS")]);
        assert_eq!(merged, vec![("api-version", "1.0"), ("input.iataCodes", "BTS")]);
    }

    #[test]
    fn query_overrides_default() {
        let merged = merge_query(&[("api-version", "1.0")], &[("api-version", "2.0")]);
        assert_eq!(merged, vec![("api-version", "2.0")]);
    }

    #[test]
    fn query_keeps_repeated_keys() {
        let merged = merge_query(
            &[("api-version", "1.0")],
            &[("input.spokenLanguages", "a"), ("input.spokenLanguages", "b")],
        );
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[1], ("input.spokenLanguages", "a"));
        assert_eq!(merged[2], ("input.spokenLanguages", "b"));
    }

    #[test]
    fn headers_default_accept() {
        let headers = build_headers(&[]).unwrap();
        assert_eq!(headers[ACCEPT], "application/json");
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn headers_override_default() {
        let headers =
            build_headers(&[("Accept", "text/plain"), ("accept-language", "sk-SK")]).unwrap();
        assert_eq!(headers[ACCEPT], "text/plain");
        assert_eq!(headers["accept-language"], "sk-SK");
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn headers_reject_invalid_value() {
        let err = build_headers(&[("x-scope-id", "bad\nvalue")]).unwrap_err();
        assert!(matches!(err, SeePlacesError::InvalidHeader { name } if name == "x-scope-id"));
    }
}
