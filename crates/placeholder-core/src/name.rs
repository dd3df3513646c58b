//! Normalised placeholder names.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlaceholderError, PlaceholderResult};

/// A placeholder name, stored without its `{ }` delimiters.
///
/// Names are case-insensitive: construction lowercases the input, so two
/// names compare equal whenever their lowercase forms do. A name is never
/// empty and never contains `{` or `}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlaceholderName(String);

impl PlaceholderName {
    /// Validates and normalises `raw` into a placeholder name.
    pub fn new(raw: &str) -> PlaceholderResult<Self> {
        if raw.is_empty() {
            return Err(PlaceholderError::invalid("placeholder name is empty"));
        }
        if raw.contains(['{', '}']) {
            return Err(PlaceholderError::invalid(format!(
                "placeholder name '{raw}' contains a '{{' or '}}' delimiter"
            )));
        }
        Ok(Self(raw.to_lowercase()))
    }

    /// Returns the normalised (lowercase) name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name wrapped in delimiters, e.g. `{player_name}`.
    pub fn token(&self) -> String {
        format!("{{{}}}", self.0)
    }
}

impl fmt::Display for PlaceholderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PlaceholderName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PlaceholderName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlaceholderName {
    type Error = PlaceholderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl TryFrom<&str> for PlaceholderName {
    type Error = PlaceholderError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlaceholderName> for String {
    fn from(name: PlaceholderName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_lowercased() {
        let name = PlaceholderName::new("Player_NAME").unwrap();
        assert_eq!(name.as_str(), "player_name");
        assert_eq!(name, PlaceholderName::new("player_name").unwrap());
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = PlaceholderName::new("").unwrap_err();
        assert!(matches!(err, PlaceholderError::InvalidArgument { .. }));
    }

    #[test]
    fn test_delimiters_rejected() {
        assert!(PlaceholderName::new("{rank}").is_err());
        assert!(PlaceholderName::new("ra}nk").is_err());
    }

    #[test]
    fn test_token_wraps_in_braces() {
        let name = PlaceholderName::new("rank").unwrap();
        assert_eq!(name.token(), "{rank}");
    }
}
