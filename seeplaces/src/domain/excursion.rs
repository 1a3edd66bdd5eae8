//! Excursion value objects.
//!
//! An `Excursion` is parsed directly from one element of the
//! `ExcursionForIataCode` response. Every declared field is mandatory:
//! a response item missing any of them fails deserialization. Fields the
//! API sends that are not declared here are ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Shown when the duration should be hidden.
const DURATION_UNAVAILABLE: &str = "Nie je k dispozícii";

/// Shown for excursions lasting the whole day.
const DURATION_ALL_DAY: &str = "Celý deň";

/// Duration settings of an excursion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExcursionDuration {
    pub is_all_day: bool,
    pub is_many_days: bool,
    pub duration_hours: f64,
    pub duration_days: f64,
    pub hide_duration: bool,
}

impl ExcursionDuration {
    /// Human-readable duration, localized to Slovak.
    ///
    /// The flags are checked in a fixed order and the first one set wins:
    /// hidden, then multi-day (day count), then all-day, and otherwise the
    /// hour count. A record flagged both multi-day and all-day therefore
    /// reports its day count.
    pub fn readable(&self) -> String {
        if self.hide_duration {
            return DURATION_UNAVAILABLE.to_string();
        }

        if self.is_many_days {
            return format!("Počet dní: {:.2}", self.duration_days);
        }

        if self.is_all_day {
            return DURATION_ALL_DAY.to_string();
        }

        format!("Počet hodín: {:.2}", self.duration_hours)
    }
}

impl fmt::Display for ExcursionDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.readable())
    }
}

/// An excursion offered at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Excursion {
    name: String,
    final_price: f64,
    photo_path: String,
    description: String,
    currency: String,
    included_in_price: Vec<String>,
    #[serde(flatten)]
    duration: ExcursionDuration,
}

impl Excursion {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn final_price(&self) -> f64 {
        self.final_price
    }

    /// URL of the excursion photo.
    pub fn photo_path(&self) -> &str {
        &self.photo_path
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// ISO 4217 currency code of `final_price`.
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Items included in the price, in the order the API lists them.
    pub fn included_in_price(&self) -> &[String] {
        &self.included_in_price
    }

    pub fn duration(&self) -> &ExcursionDuration {
        &self.duration
    }

    /// Duration in readable format. See [`ExcursionDuration::readable`].
    pub fn duration_display(&self) -> String {
        self.duration.readable()
    }
}
