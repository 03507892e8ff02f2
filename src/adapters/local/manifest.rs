//! JSON lines manifest storage
//!
//! One [`ManifestEntry`] per line, appended and synced on every write. Suited
//! to local runs and tests; the PostgreSQL backend is the default.
//!
//! The file is parsed once, on the first lookup, and the parsed entries are
//! kept in memory and extended on every append. Lines written to the file by
//! another process after that first read are not seen by this instance.

use crate::adapters::database::traits::ManifestStorage;
use crate::core::manifest::ManifestEntry;
use crate::domain::ids::BatchNumber;
use crate::domain::{RelexError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Append-only file ledger
pub struct FileManifestStorage {
    path: PathBuf,
    // Parsed entries, loaded lazily; the lock also serializes appends.
    entries: Mutex<Option<Vec<ManifestEntry>>>,
}

impl FileManifestStorage {
    /// Create a ledger at `path`, creating parent directories
    ///
    /// The file itself is created on first append.
    ///
    /// # Errors
    ///
    /// Returns [`RelexError::Manifest`] if the parent directory cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                RelexError::Manifest(format!(
                    "Failed to create manifest directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        Ok(Self {
            path,
            entries: Mutex::new(None),
        })
    }

    /// Run `f` over the cached entries, loading them on first use
    async fn with_entries<T>(&self, f: impl FnOnce(&[ManifestEntry]) -> T) -> Result<T> {
        let mut cache = self.entries.lock().await;
        if cache.is_none() {
            *cache = Some(self.read_all().await?);
        }
        Ok(f(cache.as_deref().unwrap_or_default()))
    }

    async fn read_all(&self) -> Result<Vec<ManifestEntry>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(RelexError::Manifest(format!(
                    "Failed to read manifest {}: {e}",
                    self.path.display()
                )))
            }
        };

        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                serde_json::from_str(line).map_err(|e| {
                    RelexError::Manifest(format!(
                        "Malformed manifest line {} in {}: {e}",
                        n + 1,
                        self.path.display()
                    ))
                })
            })
            .collect()
    }
}

#[async_trait]
impl ManifestStorage for FileManifestStorage {
    async fn append(&self, entry: &ManifestEntry) -> Result<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut cache = self.entries.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                RelexError::Manifest(format!("Failed to open manifest {}: {e}", self.path.display()))
            })?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| RelexError::Manifest(format!("Failed to append manifest entry: {e}")))?;
        file.sync_data()
            .await
            .map_err(|e| RelexError::Manifest(format!("Failed to sync manifest: {e}")))?;

        if let Some(entries) = cache.as_mut() {
            entries.push(entry.clone());
        }
        Ok(())
    }

    async fn last_success(
        &self,
        batch_number: BatchNumber,
        page_index: u64,
    ) -> Result<Option<ManifestEntry>> {
        self.with_entries(|entries| {
            entries
                .iter()
                .rev()
                .find(|e| e.success && e.is_for(batch_number, page_index))
                .cloned()
        })
        .await
    }

    async fn list_entries(&self) -> Result<Vec<ManifestEntry>> {
        self.with_entries(<[ManifestEntry]>::to_vec).await
    }
}
