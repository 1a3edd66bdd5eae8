//! Location codes used to scope excursion queries.

use std::fmt;
use std::str::FromStr;

/// Why a string is not an [`IataCode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid IATA code: {reason}")]
pub struct InvalidIataCode {
    reason: &'static str,
}

/// Three uppercase ASCII letters naming an airport or city, e.g. `BTS`.
///
/// ```
/// use seeplaces::domain::IataCode;
///
/// let vie: IataCode = "VIE".parse().unwrap();
/// assert_eq!(vie.to_string(), "VIE");
/// assert!("vie".parse::<IataCode>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IataCode([u8; 3]);

impl IataCode {
    pub fn parse(s: &str) -> Result<Self, InvalidIataCode> {
        let letters: [u8; 3] = s.as_bytes().try_into().map_err(|_| InvalidIataCode {
            reason: "must be exactly 3 characters",
        })?;

        match letters.iter().all(u8::is_ascii_uppercase) {
            true => Ok(Self(letters)),
            false => Err(InvalidIataCode {
                reason: "must be uppercase ASCII letters A-Z",
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        // parse only admits A-Z
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl FromStr for IataCode {
    type Err = InvalidIataCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IataCode").field(&self.as_str()).finish()
    }
}
