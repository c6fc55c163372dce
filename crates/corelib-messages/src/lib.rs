//! Localized message lookup for error codes
//!
//! Catalogs are flat `key = "text"` TOML files named after a base name
//! and a locale (`messages_en_IN.toml`, `messages_en.toml`,
//! `messages.toml`). [`MessageResolver`] loads each locale at most once
//! and falls back to returning the key itself whenever a lookup cannot
//! be satisfied.

#![allow(clippy::must_use_candidate)]

mod catalog;
mod error;
mod locale;
mod resolver;

pub use catalog::{CatalogSource, DirectorySource, InMemorySource, MessageCatalog};
pub use error::CatalogError;
pub use locale::Locale;
pub use resolver::{DEFAULT_BASE_NAME, MessageResolver};
