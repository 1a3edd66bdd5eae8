//! SeePlaces excursion client.
//!
//! Fetches excursions and spoken-language metadata from the SeePlaces API,
//! parses them into typed values and optionally caches the results.
//!
//! Looking up excursions takes two calls: language names are first mapped
//! to backend ids, then the ids go into the excursion query. Both results
//! are cached under keys derived from the request.

pub mod api;
pub mod cache;
pub mod config;
pub mod domain;
pub mod service;

pub use api::{SeePlacesClient, SeePlacesError, SpokenLanguage};
pub use cache::{CacheConfig, CachedValue, MokaResponseCache, ResponseCache};
pub use config::{ConfigError, SeePlacesOptions};
pub use domain::{Excursion, ExcursionDuration, IataCode};
pub use service::SeePlacesService;
