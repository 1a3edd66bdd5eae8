//! Domain types for the SeePlaces client.
//!
//! Values here are validated at construction (`IataCode`) or at
//! deserialization (`Excursion`), so code receiving them can trust them.

mod excursion;
mod iata;

pub use excursion::{Excursion, ExcursionDuration};
pub use iata::{IataCode, InvalidIataCode};
