//! SeePlaces API client.
//!
//! This module provides a blocking HTTP client for the SeePlaces excursion
//! API and the serde types for its responses.
//!
//! Key characteristics of the API:
//! - Languages are filtered by backend ids, not names, so every excursion
//!   query needs a prior `ExcursionSpokenLanguages` lookup
//! - Set-valued query parameters are sent as repeated keys
//! - `accept-language` selects the language of the response text

mod client;
mod error;
mod types;

pub use client::{EXCURSIONS_ENDPOINT, SPOKEN_LANGUAGES_ENDPOINT, SeePlacesClient};
pub use error::SeePlacesError;
pub use types::{
    ExcursionsResponse, SpokenLanguage, SpokenLanguagesResponse, parse_excursions,
    parse_spoken_languages,
};
