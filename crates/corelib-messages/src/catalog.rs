use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{CatalogError, Locale};

/// Immutable key to text table for one locale
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    entries: HashMap<String, String>,
}

impl MessageCatalog {
    pub const fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MessageCatalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Where catalogs come from
pub trait CatalogSource: Send + Sync {
    /// Load the catalog for `locale`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` when nothing exists for the locale,
    /// or an I/O or parse error for an unreadable catalog
    fn load(&self, base_name: &str, locale: &Locale) -> Result<MessageCatalog, CatalogError>;
}

/// Catalogs stored as TOML files in one directory
///
/// For `en-IN` the files `{base}.toml`, `{base}_en.toml` and
/// `{base}_en_IN.toml` are merged, with more specific files overriding
/// less specific ones.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    directory: PathBuf,
}

impl DirectorySource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn read(path: &Path) -> Result<Option<HashMap<String, String>>, CatalogError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CatalogError::Io {
                    path: path.to_owned(),
                    source,
                });
            }
        };

        toml::from_str(&raw).map(Some).map_err(|source| CatalogError::Parse {
            path: path.to_owned(),
            source,
        })
    }
}

impl CatalogSource for DirectorySource {
    fn load(&self, base_name: &str, locale: &Locale) -> Result<MessageCatalog, CatalogError> {
        let mut entries = HashMap::new();
        let mut found = false;

        // Least specific first so later files override
        for suffix in locale.bundle_suffixes().iter().rev() {
            let path = self.directory.join(format!("{base_name}{suffix}.toml"));
            if let Some(layer) = Self::read(&path)? {
                tracing::debug!(path = %path.display(), entries = layer.len(), "loaded catalog file");
                entries.extend(layer);
                found = true;
            }
        }

        if !found {
            return Err(CatalogError::NotFound {
                base_name: base_name.to_owned(),
                locale: locale.clone(),
            });
        }

        Ok(MessageCatalog::new(entries))
    }
}

/// Catalogs held in memory, keyed by exact locale
///
/// Used for embedded deployments and tests; no fallback chain applies.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    catalogs: HashMap<Locale, MessageCatalog>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_catalog(mut self, locale: Locale, catalog: MessageCatalog) -> Self {
        self.catalogs.insert(locale, catalog);
        self
    }
}

impl CatalogSource for InMemorySource {
    fn load(&self, base_name: &str, locale: &Locale) -> Result<MessageCatalog, CatalogError> {
        self.catalogs.get(locale).cloned().ok_or_else(|| CatalogError::NotFound {
            base_name: base_name.to_owned(),
            locale: locale.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn merges_fallback_chain() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "messages.toml", "S500 = \"Something went wrong\"\nB001 = \"base\"\n");
        write(dir.path(), "messages_en.toml", "B001 = \"english\"\n");
        write(dir.path(), "messages_en_IN.toml", "B002 = \"india only\"\n");

        let catalog = DirectorySource::new(dir.path())
            .load("messages", &Locale::default())
            .unwrap();

        assert_eq!(catalog.get("S500"), Some("Something went wrong"));
        assert_eq!(catalog.get("B001"), Some("english"));
        assert_eq!(catalog.get("B002"), Some("india only"));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn specific_file_overrides_base() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "messages.toml", "B001 = \"base\"\n");
        write(dir.path(), "messages_en_IN.toml", "B001 = \"regional\"\n");

        let catalog = DirectorySource::new(dir.path())
            .load("messages", &Locale::default())
            .unwrap();
        assert_eq!(catalog.get("B001"), Some("regional"));
    }

    #[test]
    fn missing_everywhere_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = DirectorySource::new(dir.path())
            .load("messages", &Locale::default())
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[test]
    fn other_language_does_not_match() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "messages_fr.toml", "B001 = \"bonjour\"\n");

        let err = DirectorySource::new(dir.path())
            .load("messages", &Locale::default())
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[test]
    fn non_string_values_fail_to_parse() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "messages.toml", "B001 = 42\n");

        let err = DirectorySource::new(dir.path())
            .load("messages", &Locale::default())
            .unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn in_memory_is_exact_match() {
        let source = InMemorySource::new().with_catalog(Locale::default(), [("B001", "hello")].into_iter().collect());

        assert_eq!(
            source.load("messages", &Locale::default()).unwrap().get("B001"),
            Some("hello")
        );
        assert!(source.load("messages", &Locale::new("en", None)).is_err());
    }
}
