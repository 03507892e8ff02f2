//! Backend factory
//!
//! This module provides factory functions that build the row source, the
//! manifest storage and the destination from configuration.

use crate::adapters::database::traits::{ManifestStorage, RowSource};
use crate::adapters::local::FileManifestStorage;
use crate::adapters::postgresql::{
    PoolSettings, PostgresClient, PostgresManifestStorage, PostgresRowSource,
};
use crate::adapters::sql::{FileQueryCatalog, ResolvedQueries};
use crate::adapters::storage::{ObjectStorage, ObjectStoreDestination};
use crate::config::{ManifestBackend, RelexConfig, SourceConfig};
use crate::domain::Result;
use std::sync::Arc;

/// Queries the row source needs
pub const SOURCE_QUERIES: [&str; 7] = [
    "export_count",
    "export_paged",
    "export_next_report",
    "export_report_id_at",
    "export_articles",
    "export_profiles",
    "export_profile_details",
];

/// Queries the PostgreSQL manifest backend needs
pub const MANIFEST_QUERIES: [&str; 3] = [
    "insert_export_manifest",
    "check_page_exported",
    "list_export_manifest",
];

/// Query names that must resolve for this configuration
pub fn required_queries(config: &RelexConfig) -> Vec<&'static str> {
    let mut names = SOURCE_QUERIES.to_vec();
    if config.manifest.backend == ManifestBackend::PostgreSQL {
        names.extend(MANIFEST_QUERIES);
    }
    names
}

/// Resolve every query this configuration needs
///
/// # Errors
///
/// Returns [`crate::domain::RelexError::QueryCatalog`] for the first name
/// that is unmapped or whose file is missing.
pub fn resolve_queries(config: &RelexConfig, names: &[&str]) -> Result<Arc<ResolvedQueries>> {
    let catalog = FileQueryCatalog::from_config(&config.queries);
    let resolved = ResolvedQueries::resolve(&catalog, names)?;

    tracing::debug!(
        count = resolved.len(),
        base_path = %config.queries.base_path,
        "Resolved named queries"
    );

    Ok(Arc::new(resolved))
}

fn pool_settings(source: &SourceConfig) -> PoolSettings {
    PoolSettings {
        max_connections: source.max_connections,
        connection_timeout_seconds: source.connection_timeout_seconds,
        statement_timeout_seconds: source.statement_timeout_seconds,
    }
}

/// Create the row source and manifest storage
///
/// When the manifest lives in PostgreSQL without its own connection string,
/// both share the source pool. Connections are tested before returning.
///
/// # Errors
///
/// Returns an error if a query cannot be resolved, a client cannot be
/// created, or a connection test fails.
pub async fn create_source_and_manifest(
    config: &RelexConfig,
) -> Result<(
    Arc<dyn RowSource + Send + Sync>,
    Arc<dyn ManifestStorage + Send + Sync>,
)> {
    let queries = resolve_queries(config, &required_queries(config))?;
    let settings = pool_settings(&config.source);

    tracing::info!("Creating PostgreSQL row source");
    let source_client = Arc::new(PostgresClient::new(
        &config.source.connection_string,
        &settings,
    )?);
    source_client.test_connection().await?;

    let row_source = Arc::new(PostgresRowSource::new(source_client.clone(), queries.clone()));
    let manifest = create_manifest_with(config, queries, Some(source_client)).await?;

    Ok((row_source as Arc<dyn RowSource + Send + Sync>, manifest))
}

/// Create the manifest storage on its own, for read-only commands
///
/// # Errors
///
/// Returns an error if the backend cannot be created or reached.
pub async fn create_manifest_storage(
    config: &RelexConfig,
) -> Result<Arc<dyn ManifestStorage + Send + Sync>> {
    let names: Vec<&str> = match config.manifest.backend {
        ManifestBackend::PostgreSQL => MANIFEST_QUERIES.to_vec(),
        ManifestBackend::File => Vec::new(),
    };
    let queries = resolve_queries(config, &names)?;
    create_manifest_with(config, queries, None).await
}

async fn create_manifest_with(
    config: &RelexConfig,
    queries: Arc<ResolvedQueries>,
    source_client: Option<Arc<PostgresClient>>,
) -> Result<Arc<dyn ManifestStorage + Send + Sync>> {
    match config.manifest.backend {
        ManifestBackend::File => {
            tracing::info!(path = %config.manifest.path, "Creating file manifest storage");
            let storage = FileManifestStorage::new(&config.manifest.path)?;
            Ok(Arc::new(storage) as Arc<dyn ManifestStorage + Send + Sync>)
        }
        ManifestBackend::PostgreSQL => {
            let client = match (&config.manifest.connection_string, source_client) {
                (None, Some(shared)) => shared,
                (Some(dsn), _) => {
                    let client =
                        Arc::new(PostgresClient::new(dsn, &pool_settings(&config.source))?);
                    client.test_connection().await?;
                    client
                }
                (None, None) => {
                    let client = Arc::new(PostgresClient::new(
                        &config.source.connection_string,
                        &pool_settings(&config.source),
                    )?);
                    client.test_connection().await?;
                    client
                }
            };

            tracing::info!(
                database = %client.connection_string_safe(),
                "Creating PostgreSQL manifest storage"
            );
            Ok(Arc::new(PostgresManifestStorage::new(client, queries))
                as Arc<dyn ManifestStorage + Send + Sync>)
        }
    }
}

/// Create the destination object store
///
/// # Errors
///
/// Returns an error if the URL cannot be turned into a store.
pub fn create_destination(config: &RelexConfig) -> Result<Arc<dyn ObjectStorage + Send + Sync>> {
    let destination =
        ObjectStoreDestination::parse(&config.destination.url, &config.destination.region)?;

    tracing::info!(
        url = %config.destination.url,
        scheme = destination.scheme(),
        prefix = %config.destination.prefix,
        "Created destination store"
    );

    Ok(Arc::new(destination) as Arc<dyn ObjectStorage + Send + Sync>)
}
