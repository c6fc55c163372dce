use std::path::PathBuf;

use serde::Deserialize;

/// Message catalog configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessagesConfig {
    /// Directory holding `{base_name}[_{lang}[_{REGION}]].toml` files
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_base_name")]
    pub base_name: String,
    /// Locale used when none is requested, e.g. `en-IN`
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            base_name: default_base_name(),
            default_locale: default_locale(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("messages")
}

fn default_base_name() -> String {
    corelib_messages::DEFAULT_BASE_NAME.to_owned()
}

fn default_locale() -> String {
    corelib_messages::Locale::default().to_string()
}

impl MessagesConfig {
    /// Parsed default locale
    ///
    /// # Errors
    ///
    /// Returns an error if `default_locale` is not of the form `en` or `en-IN`
    pub fn locale(&self) -> Result<corelib_messages::Locale, corelib_messages::CatalogError> {
        self.default_locale.parse()
    }
}
