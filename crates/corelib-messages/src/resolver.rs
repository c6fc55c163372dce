use std::sync::Arc;

use dashmap::DashMap;

use crate::{CatalogError, CatalogSource, Locale, MessageCatalog};

/// Base name catalogs are looked up under unless configured otherwise
pub const DEFAULT_BASE_NAME: &str = "messages";

/// Resolves message keys to localized text
///
/// Catalogs are loaded on first use per locale and kept for the life of
/// the resolver. Lookups never fail: an unknown key or an unavailable
/// catalog resolves to the key itself.
pub struct MessageResolver {
    source: Box<dyn CatalogSource>,
    base_name: String,
    default_locale: Locale,
    catalogs: DashMap<Locale, Arc<MessageCatalog>>,
}

impl MessageResolver {
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            base_name: DEFAULT_BASE_NAME.to_owned(),
            default_locale: Locale::default(),
            catalogs: DashMap::new(),
        }
    }

    #[must_use]
    pub fn with_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = base_name.into();
        self
    }

    #[must_use]
    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    pub const fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Load the default locale's catalog ahead of the first request
    ///
    /// Returns whether the catalog is now cached. A failed load is logged
    /// and retried on the next resolution.
    pub fn preload(&self) -> bool {
        match self.catalog(&self.default_locale) {
            Ok(catalog) => {
                tracing::info!(locale = %self.default_locale, messages = catalog.len(), "message catalog preloaded");
                true
            }
            Err(e) => {
                tracing::warn!(locale = %self.default_locale, error = %e, "message catalog preload failed");
                false
            }
        }
    }

    /// Resolve `key` in the default locale
    pub fn resolve(&self, key: &str) -> String {
        self.resolve_in(key, &self.default_locale)
    }

    /// Resolve `key` in `locale`, falling back to the key itself
    pub fn resolve_in(&self, key: &str, locale: &Locale) -> String {
        match self.catalog(locale) {
            Ok(catalog) => {
                if let Some(text) = catalog.get(key) {
                    return text.to_owned();
                }
                tracing::warn!(key, base_name = %self.base_name, %locale, "message key not found in catalog");
            }
            Err(CatalogError::NotFound { .. }) => {
                tracing::error!(base_name = %self.base_name, %locale, "message catalog not found for locale");
            }
            Err(e) => {
                tracing::error!(key, %locale, error = %e, "failed to load message catalog");
            }
        }
        key.to_owned()
    }

    /// Cached catalog for `locale`, loading it on first use
    ///
    /// The map entry stays locked while loading, so concurrent first
    /// callers for one locale wait for a single load and share its result.
    /// Failed loads are not cached.
    fn catalog(&self, locale: &Locale) -> Result<Arc<MessageCatalog>, CatalogError> {
        if let Some(catalog) = self.catalogs.get(locale) {
            return Ok(Arc::clone(catalog.value()));
        }

        let entry = self.catalogs.entry(locale.clone()).or_try_insert_with(|| {
            tracing::debug!(base_name = %self.base_name, %locale, "loading message catalog");
            self.source.load(&self.base_name, locale).map(Arc::new)
        })?;
        Ok(Arc::clone(entry.value()))
    }
}

impl std::fmt::Debug for MessageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageResolver")
            .field("base_name", &self.base_name)
            .field("default_locale", &self.default_locale)
            .field("cached_locales", &self.catalogs.len())
            .finish_non_exhaustive()
    }
}
