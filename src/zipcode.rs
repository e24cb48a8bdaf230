//! Postal code validation.

use std::fmt;
use std::str::FromStr;

use crate::error::LookupError;

/// A validated Brazilian postal code: exactly 8 ASCII digits.
///
/// Construction is the validation; no network call happens before a raw
/// string has been parsed into this type. No sign, whitespace or separator
/// characters are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Zipcode(String);

impl Zipcode {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Zipcode {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(LookupError::InvalidZipcode)
        }
    }
}

impl fmt::Display for Zipcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
