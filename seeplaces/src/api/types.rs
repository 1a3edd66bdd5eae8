//! SeePlaces API response types.
//!
//! Response envelopes treat their array field as optional: a missing or
//! `null` array means "no results". The records inside the arrays are
//! strict and fail on any missing declared field.

use serde::Deserialize;

use crate::domain::Excursion;

/// A spoken language known to the SeePlaces backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpokenLanguage {
    /// Backend identifier, passed back as `input.spokenLanguages`.
    pub id: String,
    /// English display name, e.g. "Slovak".
    pub name: String,
    pub url_name: Option<String>,
}

/// Body of `ExcursionSpokenLanguages`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpokenLanguagesResponse {
    pub spoken_languages: Option<Vec<SpokenLanguage>>,
}

/// Body of `ExcursionForIataCode`.
///
/// The envelope also carries a `Total` count. It is not read, so an odd value
/// there never spoils a list of valid items.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExcursionsResponse {
    pub items: Option<Vec<Excursion>>,
}

/// Parse an `ExcursionSpokenLanguages` body into language records.
pub fn parse_spoken_languages(body: &str) -> Result<Vec<SpokenLanguage>, serde_json::Error> {
    let response: SpokenLanguagesResponse = serde_json::from_str(body)?;
    Ok(response.spoken_languages.unwrap_or_default())
}

/// Parse an `ExcursionForIataCode` body into excursions.
pub fn parse_excursions(body: &str) -> Result<Vec<Excursion>, serde_json::Error> {
    let response: ExcursionsResponse = serde_json::from_str(body)?;
    Ok(response.items.unwrap_or_default())
}
