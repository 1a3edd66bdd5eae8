//! Cached excursion lookups.
//!
//! [`SeePlacesService`] combines the HTTP client with an optional
//! [`ResponseCache`]. Without a cache every call goes to the API.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::api::{SeePlacesClient, SeePlacesError, SpokenLanguage};
use crate::cache::{
    CachedValue, EXCURSIONS_TTL, LANGUAGES_TTL, ResponseCache, excursions_cache_key,
    languages_cache_key,
};
use crate::config::SeePlacesOptions;
use crate::domain::{Excursion, IataCode};

/// SeePlaces client with optional caching.
pub struct SeePlacesService {
    client: SeePlacesClient,
    cache: Option<Arc<dyn ResponseCache>>,
}

impl SeePlacesService {
    /// Create a service that always calls the API.
    pub fn new(client: SeePlacesClient) -> Self {
        Self {
            client,
            cache: None,
        }
    }

    /// Create a service that checks `cache` before calling the API.
    pub fn with_cache(client: SeePlacesClient, cache: Arc<dyn ResponseCache>) -> Self {
        Self {
            client,
            cache: Some(cache),
        }
    }

    /// Build the client from `options` and wrap it, with or without a cache.
    pub fn from_options(
        options: SeePlacesOptions,
        cache: Option<Arc<dyn ResponseCache>>,
    ) -> Result<Self, SeePlacesError> {
        let client = SeePlacesClient::new(options)?;
        Ok(Self { client, cache })
    }

    /// Access the underlying client for calls that bypass the cache.
    pub fn client(&self) -> &SeePlacesClient {
        &self.client
    }

    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    /// Cache key for `names`, using the configured prefix.
    pub fn languages_cache_key<S: AsRef<str>>(&self, names: &[S]) -> String {
        languages_cache_key(self.client.options().cache_prefix(), names)
    }

    /// Cache key for an excursion query, using the configured prefix.
    pub fn excursions_cache_key<S: AsRef<str>>(
        &self,
        iata_code: &IataCode,
        date_from: NaiveDate,
        names: &[S],
    ) -> String {
        excursions_cache_key(self.client.options().cache_prefix(), iata_code, date_from, names)
    }

    /// Every spoken language the backend knows. Not cached.
    pub fn spoken_languages(&self) -> Result<Vec<SpokenLanguage>, SeePlacesError> {
        self.client.fetch_spoken_languages()
    }

    /// Backend ids of the languages called `names`.
    ///
    /// Names the backend does not know are skipped silently. A cached result
    /// is returned as is.
    pub fn resolve_language_ids<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<BTreeSet<String>, SeePlacesError> {
        let key = self.languages_cache_key(names);

        if let Some(ids) = self.cached(&key).and_then(|value| match value {
            CachedValue::LanguageIds(ids) => Some(ids),
            CachedValue::Excursions(_) => {
                warn!(%key, "expected language ids in cache, ignoring entry");
                None
            }
        }) {
            debug!(%key, "language ids cache hit");
            return Ok(ids);
        }
        debug!(%key, "language ids cache miss");

        let languages = self.client.fetch_spoken_languages()?;
        let ids = select_ids(languages, names);

        self.store(&key, CachedValue::LanguageIds(ids.clone()), LANGUAGES_TTL);
        Ok(ids)
    }

    /// Excursions at `iata_code` between the two dates, guided in any of
    /// `spoken_languages`.
    ///
    /// The cache key covers the IATA code, the month of `date_from` and the
    /// language names, so a hit skips both the language lookup and the
    /// excursion call.
    pub fn get_excursions<S: AsRef<str>>(
        &self,
        iata_code: &IataCode,
        date_from: NaiveDate,
        date_to: NaiveDate,
        spoken_languages: &[S],
    ) -> Result<Arc<Vec<Excursion>>, SeePlacesError> {
        let key = self.excursions_cache_key(iata_code, date_from, spoken_languages);

        if let Some(excursions) = self.cached(&key).and_then(|value| match value {
            CachedValue::Excursions(excursions) => Some(excursions),
            CachedValue::LanguageIds(_) => {
                warn!(%key, "expected excursions in cache, ignoring entry");
                None
            }
        }) {
            debug!(%key, count = excursions.len(), "excursions cache hit");
            return Ok(excursions);
        }
        debug!(%key, "excursions cache miss");

        let language_ids = self.resolve_language_ids(spoken_languages)?;
        let excursions = Arc::new(self.client.fetch_excursions(
            iata_code,
            date_from,
            date_to,
            &language_ids,
        )?);

        self.store(&key, CachedValue::Excursions(Arc::clone(&excursions)), EXCURSIONS_TTL);
        Ok(excursions)
    }

    fn cached(&self, key: &str) -> Option<CachedValue> {
        self.cache.as_ref()?.get(key)
    }

    fn store(&self, key: &str, value: CachedValue, ttl: std::time::Duration) {
        if let Some(cache) = &self.cache {
            cache.set(key, value, ttl);
        }
    }
}

/// Ids of the languages whose name is one of `names`.
fn select_ids<S: AsRef<str>>(languages: Vec<SpokenLanguage>, names: &[S]) -> BTreeSet<String> {
    let wanted: HashSet<&str> = names.iter().map(|name| name.as_ref()).collect();
    languages
        .into_iter()
        .filter(|language| wanted.contains(language.name.as_str()))
        .map(|language| language.id)
        .collect()
}
