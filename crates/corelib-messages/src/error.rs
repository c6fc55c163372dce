use std::path::PathBuf;

use thiserror::Error;

use crate::Locale;

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No catalog file exists anywhere in the locale's fallback chain
    #[error("no catalog '{base_name}' found for locale {locale}")]
    NotFound { base_name: String, locale: Locale },

    /// Catalog file exists but could not be read
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not a flat table of strings
    #[error("failed to parse catalog {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Locale tag could not be parsed
    #[error("invalid locale '{0}'")]
    InvalidLocale(String),
}
