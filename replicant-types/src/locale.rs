use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest accepted language code (e.g. `zh-hant-tw` fits comfortably).
pub const MAX_LOCALE_LEN: usize = 12;

/// A validated, lowercase language code such as `en`, `fr` or `pt-br`.
///
/// Deserialization goes through the same validation as [`Locale::parse`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Parses and normalises a language code.
    pub fn parse(s: &str) -> Result<Self> {
        let code = s.trim();
        if code.is_empty() {
            return Err(Error::InvalidLocale("empty language code".into()));
        }
        if code.len() > MAX_LOCALE_LEN {
            return Err(Error::InvalidLocale(format!(
                "{code:?} is longer than {MAX_LOCALE_LEN} characters"
            )));
        }
        if !code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::InvalidLocale(format!(
                "{code:?} contains characters outside [A-Za-z0-9_-]"
            )));
        }
        Ok(Self(code.to_ascii_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = Error;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
