//! Named query resolution
//!
//! Query text lives in files next to the deployment, mapped from logical
//! names in the `[queries]` configuration section.

use crate::config::QueriesConfig;
use crate::domain::errors::QueryCatalogError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Resolves a logical query name to executable query text
pub trait QueryCatalog: Send + Sync {
    /// Get the text of a named query
    ///
    /// # Errors
    ///
    /// Returns [`QueryCatalogError::NotFound`] for an unmapped name and
    /// [`QueryCatalogError::ResourceMissing`] when the mapped file does not
    /// exist.
    fn get(&self, name: &str) -> Result<String, QueryCatalogError>;
}

/// File-backed query catalog
///
/// # Examples
///
/// ```no_run
/// use relex::adapters::sql::{FileQueryCatalog, QueryCatalog};
/// use relex::config::QueriesConfig;
///
/// let catalog = FileQueryCatalog::from_config(&QueriesConfig::default());
/// let sql = catalog.get("export_count").expect("query should resolve");
/// ```
#[derive(Debug, Clone)]
pub struct FileQueryCatalog {
    base_path: PathBuf,
    files: BTreeMap<String, String>,
}

impl FileQueryCatalog {
    /// Create a catalog over an explicit name-to-file map
    pub fn new(base_path: impl AsRef<Path>, files: BTreeMap<String, String>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            files,
        }
    }

    /// Create a catalog from the `[queries]` section
    pub fn from_config(config: &QueriesConfig) -> Self {
        Self::new(&config.base_path, config.files.clone())
    }

    /// Full path a name maps to, if it is mapped
    pub fn path_of(&self, name: &str) -> Option<PathBuf> {
        self.files.get(name).map(|file| self.base_path.join(file))
    }
}

impl QueryCatalog for FileQueryCatalog {
    fn get(&self, name: &str) -> Result<String, QueryCatalogError> {
        let full = self
            .path_of(name)
            .ok_or_else(|| QueryCatalogError::NotFound(name.to_string()))?;

        tracing::debug!(query = name, path = %full.display(), "Resolving query");

        if !full.is_file() {
            return Err(QueryCatalogError::ResourceMissing {
                name: name.to_string(),
                path: full.display().to_string(),
            });
        }

        std::fs::read_to_string(&full).map_err(|e| QueryCatalogError::Unreadable {
            name: name.to_string(),
            message: e.to_string(),
        })
    }
}

/// Query text resolved once at startup
///
/// Holding the text rather than the catalog means a missing file fails the
/// run before any page work, never halfway through a batch.
#[derive(Debug, Clone, Default)]
pub struct ResolvedQueries {
    texts: BTreeMap<String, String>,
}

impl ResolvedQueries {
    /// Resolve every listed name
    ///
    /// # Errors
    ///
    /// Returns the first resolution failure.
    pub fn resolve(catalog: &dyn QueryCatalog, names: &[&str]) -> Result<Self, QueryCatalogError> {
        let mut texts = BTreeMap::new();
        for name in names {
            texts.insert(name.to_string(), catalog.get(name)?);
        }
        Ok(Self { texts })
    }

    /// Text of a resolved query
    ///
    /// # Errors
    ///
    /// Returns [`QueryCatalogError::NotFound`] if the name was not part of
    /// the resolved set.
    pub fn text(&self, name: &str) -> Result<&str, QueryCatalogError> {
        self.texts
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| QueryCatalogError::NotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn catalog_with(dir: &TempDir, entries: &[(&str, &str)]) -> FileQueryCatalog {
        let files = entries
            .iter()
            .map(|(name, file)| (name.to_string(), file.to_string()))
            .collect();
        FileQueryCatalog::new(dir.path(), files)
    }

    #[test]
    fn test_get_reads_mapped_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("count.sql"), "SELECT COUNT(*) FROM scoop_report").unwrap();
        let catalog = catalog_with(&dir, &[("export_count", "count.sql")]);

        let sql = catalog.get("export_count").unwrap();
        assert!(sql.contains("COUNT(*)"));
    }

    #[test]
    fn test_unmapped_name_is_not_found() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with(&dir, &[]);

        assert_eq!(
            catalog.get("export_paged"),
            Err(QueryCatalogError::NotFound("export_paged".to_string()))
        );
    }

    #[test]
    fn test_missing_file_is_resource_missing() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with(&dir, &[("export_paged", "paged.sql")]);

        match catalog.get("export_paged") {
            Err(QueryCatalogError::ResourceMissing { name, path }) => {
                assert_eq!(name, "export_paged");
                assert!(path.ends_with("paged.sql"));
            }
            other => panic!("expected ResourceMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_fails_on_first_missing() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.sql"), "SELECT 1").unwrap();
        let catalog = catalog_with(&dir, &[("a", "a.sql")]);

        let resolved = ResolvedQueries::resolve(&catalog, &["a"]).unwrap();
        assert_eq!(resolved.text("a").unwrap(), "SELECT 1");
        assert_eq!(resolved.len(), 1);
        assert!(resolved.text("b").is_err());

        let err = ResolvedQueries::resolve(&catalog, &["a", "b"]).unwrap_err();
        assert_eq!(err, QueryCatalogError::NotFound("b".to_string()));
    }
}
