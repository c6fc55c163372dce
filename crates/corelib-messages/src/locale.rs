use std::fmt;
use std::str::FromStr;

use crate::CatalogError;

/// Language plus optional region, e.g. `en-IN`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Build a locale from already-validated parts
    ///
    /// Language is lowercased and region uppercased.
    pub fn new(language: &str, region: Option<&str>) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            region: region.map(str::to_ascii_uppercase),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// File-name suffixes to try, most specific first
    ///
    /// `en-IN` yields `_en_IN`, `_en` and the empty suffix for the base
    /// catalog.
    pub fn bundle_suffixes(&self) -> Vec<String> {
        let mut suffixes = Vec::with_capacity(3);
        if let Some(region) = &self.region {
            suffixes.push(format!("_{}_{region}", self.language));
        }
        suffixes.push(format!("_{}", self.language));
        suffixes.push(String::new());
        suffixes
    }
}

impl Default for Locale {
    /// English as used in India, the catalogs' primary locale
    fn default() -> Self {
        Self::new("en", Some("IN"))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{region}", self.language),
            None => f.write_str(&self.language),
        }
    }
}

impl FromStr for Locale {
    type Err = CatalogError;

    /// Parse `en`, `en-IN` or `en_IN`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidLocale(s.to_owned());

        let mut parts = s.split(['-', '_']);
        let language = parts.next().filter(|l| is_language(l)).ok_or_else(invalid)?;
        let region = match parts.next() {
            Some(r) if is_region(r) => Some(r),
            Some(_) => return Err(invalid()),
            None => None,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self::new(language, region))
    }
}

fn is_language(s: &str) -> bool {
    (2..=3).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_region(s: &str) -> bool {
    (s.len() == 2 && s.bytes().all(|b| b.is_ascii_alphabetic()))
        || (s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit()))
}
