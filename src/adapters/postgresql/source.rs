//! PostgreSQL row source
//!
//! Implements [`RowSource`] with the named queries resolved at startup.
//! Query parameters:
//!
//! | query                    | parameters                  |
//! |--------------------------|-----------------------------|
//! | `export_count`           | none, returns one `bigint`  |
//! | `export_paged`           | `$1` offset, `$2` limit     |
//! | `export_next_report`     | `$1` last id                |
//! | `export_report_id_at`    | `$1` 0-indexed ordinal      |
//! | `export_articles`        | `$1` report id array        |
//! | `export_profiles`        | `$1` report id array        |
//! | `export_profile_details` | `$1` report id array        |

use crate::adapters::database::traits::RowSource;
use crate::adapters::postgresql::client::PostgresClient;
use crate::adapters::postgresql::models::{
    article_from_row, detail_from_row, profile_from_row, report_from_row,
};
use crate::adapters::sql::ResolvedQueries;
use crate::domain::ids::EntityId;
use crate::domain::rows::{ArticleRow, DetailRow, ProfileRow, ReportRow};
use crate::domain::{RelexError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Row source backed by PostgreSQL
pub struct PostgresRowSource {
    client: Arc<PostgresClient>,
    queries: Arc<ResolvedQueries>,
}

impl PostgresRowSource {
    /// Create a row source over a shared client
    pub fn new(client: Arc<PostgresClient>, queries: Arc<ResolvedQueries>) -> Self {
        Self { client, queries }
    }

    fn sql(&self, name: &str) -> Result<&str> {
        Ok(self.queries.text(name)?)
    }
}

fn to_i64(value: u64, what: &str) -> Result<i64> {
    i64::try_from(value).map_err(|_| RelexError::Database(format!("{what} {value} is too large")))
}

#[async_trait]
impl RowSource for PostgresRowSource {
    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn count_reports(&self) -> Result<u64> {
        let rows = self.client.query(self.sql("export_count")?, &[]).await?;
        let row = rows
            .first()
            .ok_or_else(|| RelexError::Database("export_count returned no rows".to_string()))?;

        let total: i64 = row
            .try_get(0)
            .map_err(|e| RelexError::Database(format!("Failed to decode row count: {e}")))?;
        u64::try_from(total)
            .map_err(|_| RelexError::Database(format!("export_count returned {total}")))
    }

    async fn fetch_reports_page(&self, offset: u64, limit: u64) -> Result<Vec<ReportRow>> {
        let offset = to_i64(offset, "offset")?;
        let limit = to_i64(limit, "limit")?;

        let rows = self
            .client
            .query(self.sql("export_paged")?, &[&offset, &limit])
            .await?;
        rows.iter().map(report_from_row).collect()
    }

    async fn fetch_report_after(&self, last_id: EntityId) -> Result<Option<ReportRow>> {
        let row = self
            .client
            .query_opt(self.sql("export_next_report")?, &[&last_id])
            .await?;
        row.as_ref().map(report_from_row).transpose()
    }

    async fn report_id_at(&self, ordinal: u64) -> Result<Option<EntityId>> {
        let ordinal = to_i64(ordinal, "ordinal")?;
        let row = self
            .client
            .query_opt(self.sql("export_report_id_at")?, &[&ordinal])
            .await?;

        row.map(|r| {
            r.try_get::<_, EntityId>(0)
                .map_err(|e| RelexError::Database(format!("Failed to decode report id: {e}")))
        })
        .transpose()
    }

    async fn fetch_articles(&self, report_ids: &[EntityId]) -> Result<Vec<ArticleRow>> {
        if report_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = self
            .client
            .query(self.sql("export_articles")?, &[&report_ids])
            .await?;
        rows.iter().map(article_from_row).collect()
    }

    async fn fetch_profiles(&self, report_ids: &[EntityId]) -> Result<Vec<ProfileRow>> {
        if report_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = self
            .client
            .query(self.sql("export_profiles")?, &[&report_ids])
            .await?;
        rows.iter().map(profile_from_row).collect()
    }

    async fn fetch_profile_details(&self, report_ids: &[EntityId]) -> Result<Vec<DetailRow>> {
        if report_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = self
            .client
            .query(self.sql("export_profile_details")?, &[&report_ids])
            .await?;
        rows.iter().map(detail_from_row).collect()
    }

    fn describe(&self) -> String {
        format!("postgresql ({})", self.client.connection_string_safe())
    }
}
