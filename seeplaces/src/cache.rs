//! Caching layer for SeePlaces responses.
//!
//! The service talks to its cache only through [`ResponseCache`], a plain
//! get/set contract where the caller chooses a TTL per entry. Expiry is
//! entirely the cache's business. [`MokaResponseCache`] is the bundled
//! in-memory implementation; a shared store can be plugged in instead, as
//! long as it uses the same keys.
//!
//! Keys are derived from the first three characters of each requested
//! language name, in the order given. Language metadata rarely changes and
//! is kept for a day; excursion prices change more often and are kept for
//! an hour.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{Datelike, NaiveDate};
use moka::Expiry;
use moka::sync::Cache as MokaCache;

use crate::domain::{Excursion, IataCode};

/// TTL for resolved language ids.
pub const LANGUAGES_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// TTL for excursion lists.
pub const EXCURSIONS_TTL: Duration = Duration::from_secs(60 * 60);

/// Characters of each language name that go into a cache key.
const NAME_PREFIX_CHARS: usize = 3;

/// A value stored by the service.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    /// Backend ids resolved from a list of language names.
    LanguageIds(BTreeSet<String>),
    /// Excursions returned for one query.
    Excursions(Arc<Vec<Excursion>>),
}

/// Key/value store used by the service.
///
/// Implementations must be safe to share between threads; the service
/// only ever issues single `get` and `set` calls.
pub trait ResponseCache: Send + Sync {
    /// The value stored under `key`, unless absent or expired.
    fn get(&self, key: &str) -> Option<CachedValue>;

    /// Store `value` under `key` for `ttl`.
    fn set(&self, key: &str, value: CachedValue, ttl: Duration);
}

/// Cache key for resolved language ids.
///
/// ```
/// assert_eq!(seeplaces::cache::languages_cache_key("seeplaces", &["Slovak", "Czech"]), "seeplaces_lang_SloCze");
/// ```
pub fn languages_cache_key<S: AsRef<str>>(prefix: &str, names: &[S]) -> String {
    format!("{prefix}_lang_{}", name_prefixes(names))
}

/// Cache key for an excursion query.
///
/// Only the month of `date_from` takes part; `date_to` does not.
pub fn excursions_cache_key<S: AsRef<str>>(
    prefix: &str,
    iata_code: &IataCode,
    date_from: NaiveDate,
    names: &[S],
) -> String {
    format!(
        "{prefix}_exc_{iata_code}_{}_{}",
        date_from.month(),
        name_prefixes(names)
    )
}

fn name_prefixes<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .flat_map(|name| name.as_ref().chars().take(NAME_PREFIX_CHARS))
        .collect()
}

/// Configuration for the in-memory cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    value: CachedValue,
    ttl: Duration,
}

/// Expires each entry after the TTL it was stored with.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-memory [`ResponseCache`] backed by moka.
pub struct MokaResponseCache {
    entries: MokaCache<String, Entry>,
}

impl MokaResponseCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self { entries }
    }

    /// Approximate number of live entries (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}

impl Default for MokaResponseCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

impl ResponseCache for MokaResponseCache {
    fn get(&self, key: &str) -> Option<CachedValue> {
        self.entries.get(key).map(|entry| entry.value)
    }

    fn set(&self, key: &str, value: CachedValue, ttl: Duration) {
        self.entries.insert(key.to_string(), Entry { value, ttl });
    }
}
