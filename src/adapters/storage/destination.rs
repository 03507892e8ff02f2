//! Object storage destination (S3, GCS, Azure, local, in-memory)

use crate::domain::ids::ObjectKey;
use crate::domain::{RelexError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::sync::Arc;

/// Durable blob storage for exported pages
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `body` under `key`, overwriting any existing object
    ///
    /// # Errors
    ///
    /// Returns [`RelexError::Storage`] if the write is not acknowledged.
    async fn put(&self, key: &ObjectKey, body: Bytes) -> Result<()>;

    /// Fully qualified location of a key, for logs
    fn location(&self, key: &ObjectKey) -> String;
}

/// [`ObjectStorage`] over an `object_store` backend
#[derive(Debug, Clone)]
pub struct ObjectStoreDestination {
    store: Arc<dyn ObjectStore>,
    /// Root path inside the bucket or container, taken from the URL
    root: String,
    scheme: String,
    bucket: String,
}

impl ObjectStoreDestination {
    /// Parse a destination URL and build the matching store
    ///
    /// Supported formats:
    /// - `s3://bucket/root` - AWS S3, credentials from the environment
    /// - `gs://bucket/root` - Google Cloud Storage
    /// - `az://container/root` - Azure Blob Storage
    /// - `memory://` - in-process store, dry runs and tests
    /// - `/local/path` or `file:///local/path` - local filesystem
    ///
    /// # Errors
    ///
    /// Returns [`RelexError::Configuration`] if the backend cannot be built.
    pub fn parse(url: &str, region: &str) -> Result<Self> {
        if let Some(rest) = url.strip_prefix("s3://") {
            let (bucket, root) = split_bucket(rest);
            let store = AmazonS3Builder::from_env()
                .with_bucket_name(bucket)
                .with_region(region)
                .build()
                .map_err(|e| RelexError::Configuration(format!("Failed to create s3 client: {e}")))?;
            Ok(Self::with_parts(Arc::new(store), "s3", bucket, root))
        } else if let Some(rest) = url.strip_prefix("gs://") {
            let (bucket, root) = split_bucket(rest);
            let store = GoogleCloudStorageBuilder::from_env()
                .with_bucket_name(bucket)
                .build()
                .map_err(|e| RelexError::Configuration(format!("Failed to create GCS client: {e}")))?;
            Ok(Self::with_parts(Arc::new(store), "gs", bucket, root))
        } else if let Some(rest) = url.strip_prefix("az://") {
            let (container, root) = split_bucket(rest);
            let store = MicrosoftAzureBuilder::from_env()
                .with_container_name(container)
                .build()
                .map_err(|e| {
                    RelexError::Configuration(format!("Failed to create Azure client: {e}"))
                })?;
            Ok(Self::with_parts(Arc::new(store), "az", container, root))
        } else if url.starts_with("memory://") {
            Ok(Self::from_store(Arc::new(InMemory::new()), "memory"))
        } else {
            let path = url.strip_prefix("file://").unwrap_or(url);
            std::fs::create_dir_all(path).map_err(|e| {
                RelexError::Configuration(format!("Failed to create directory {path}: {e}"))
            })?;
            let store = LocalFileSystem::new_with_prefix(path)
                .map_err(|e| RelexError::Configuration(format!("Failed to create local store: {e}")))?;
            Ok(Self::with_parts(Arc::new(store), "file", path, ""))
        }
    }

    /// Wrap an existing store
    pub fn from_store(store: Arc<dyn ObjectStore>, scheme: &str) -> Self {
        Self::with_parts(store, scheme, "", "")
    }

    fn with_parts(store: Arc<dyn ObjectStore>, scheme: &str, bucket: &str, root: &str) -> Self {
        Self {
            store,
            root: root.trim_matches('/').to_string(),
            scheme: scheme.to_string(),
            bucket: bucket.trim_end_matches('/').to_string(),
        }
    }

    /// Get the scheme (s3, gs, az, memory, file)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    fn object_path(&self, key: &ObjectKey) -> ObjectPath {
        if self.root.is_empty() {
            ObjectPath::from(key.as_str())
        } else {
            ObjectPath::from(format!("{}/{}", self.root, key))
        }
    }
}

fn split_bucket(rest: &str) -> (&str, &str) {
    rest.split_once('/').unwrap_or((rest, ""))
}

#[async_trait]
impl ObjectStorage for ObjectStoreDestination {
    async fn put(&self, key: &ObjectKey, body: Bytes) -> Result<()> {
        let path = self.object_path(key);
        self.store
            .put(&path, body.into())
            .await
            .map_err(|e| RelexError::Storage(format!("Failed to write {path}: {e}")))?;
        Ok(())
    }

    fn location(&self, key: &ObjectKey) -> String {
        let path = self.object_path(key);
        if self.bucket.is_empty() {
            format!("{}://{path}", self.scheme)
        } else {
            format!("{}://{}/{path}", self.scheme, self.bucket)
        }
    }
}
