//! VIN type, the per-vehicle primary key

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for invalid VINs
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VinError {
    #[error("VIN cannot be empty")]
    Empty,

    #[error("VIN cannot contain whitespace")]
    ContainsWhitespace,
}

/// A vehicle identification number
///
/// VINs are opaque identifiers assigned by the cloud provider; the only
/// structure assumed here is "non-empty, no whitespace". Stored uppercased
/// so that lookups are case-insensitive regardless of how the platform
/// hands them back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Vin(String);

impl Vin {
    /// Create a new VIN, normalizing to uppercase
    pub fn new(vin: impl Into<String>) -> Result<Self, VinError> {
        let vin = vin.into();
        if vin.is_empty() {
            return Err(VinError::Empty);
        }
        if vin.chars().any(char::is_whitespace) {
            return Err(VinError::ContainsWhitespace);
        }
        Ok(Self(vin.to_ascii_uppercase()))
    }

    /// Get the VIN as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Vin {
    type Err = VinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Vin {
    type Error = VinError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Vin> for String {
    fn from(vin: Vin) -> String {
        vin.0
    }
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
