//! Shared in-process doubles for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use relex::adapters::database::{ManifestStorage, RowSource};
use relex::adapters::local::FileManifestStorage;
use relex::adapters::storage::ObjectStoreDestination;
use relex::config::{parse_config, RelexConfig};
use relex::core::export::ExportCoordinator;
use relex::core::manifest::ManifestEntry;
use relex::domain::ids::{BatchNumber, EntityId};
use relex::domain::rows::{ArticleRow, DetailRow, ProfileRow, ReportRow};
use relex::domain::{RelexError, Result};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::watch;

pub fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 17)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

pub fn report(id: EntityId) -> ReportRow {
    ReportRow {
        scoop_report_id: id,
        case_id: 1000 + id,
        header_claimant: Some(format!("Claimant {id}")),
        header_client_file: Some(format!("CF-{id}")),
        header_client_name: None,
        header_delta_file: None,
        header_service_date: None,
        header_date_of_loss: None,
        footer_message: None,
        subject_identifiers: None,
        injury_information: None,
        additional_internet_information: None,
        activity_indicators: None,
        employment_summary: None,
        criminal_history: None,
        civil_history: None,
        financial_distress: None,
        recommendations: None,
        show_recommendations: false,
        identification: None,
        miscellaneous: None,
        deleted: false,
        created_by_user: 7,
        created_on: timestamp(),
        modified_by_user: 7,
        modified_on: None,
        disclaimer: None,
        report_summary: Some("summary".to_string()),
        social_media_summary: None,
        online_sources_summary: None,
        contact_information: None,
        key_finding_summary: None,
        show_disclaimer: false,
    }
}

pub fn article(id: i32, report_id: EntityId) -> ArticleRow {
    ArticleRow {
        scoop_report_article_id: id,
        scoop_report_id: report_id,
        title: Some(format!("Article {id}")),
        url: Some(format!("https://news.example/{id}")),
        summary: None,
        article_date: Some(timestamp()),
        deleted: false,
        created_by_user: 7,
        created_on: timestamp(),
        modified_by_user: 7,
        modified_on: None,
        is_key_finding: id % 2 == 0,
        key_finding_content: None,
    }
}

pub fn profile(id: i32, report_id: EntityId) -> ProfileRow {
    ProfileRow {
        scoop_report_social_media_profile_id: id,
        scoop_report_id: report_id,
        url: format!("https://social.example/{id}"),
        social_network_type_id: 1,
        profile_summary: "public profile".to_string(),
        relationship: "subject".to_string(),
        last_activity_date: timestamp(),
        deleted: false,
        created_by_user: 7,
        created_on: timestamp(),
        modified_by_user: 7,
        modified_on: timestamp(),
    }
}

pub fn detail(id: i32, profile_id: i32) -> DetailRow {
    DetailRow {
        scoop_report_social_media_profile_detail_id: id,
        scoop_report_social_media_profile_id: profile_id,
        description: "post".to_string(),
        content: format!("content {id}"),
        activity_date: None,
        deleted: false,
        created_by_user: 7,
        created_on: timestamp(),
        modified_by_user: 7,
        modified_on: None,
        is_key_finding: false,
        key_finding_content: None,
    }
}

/// Row source over a fixed, ordered id set
///
/// Each report `id` has one article `id * 10`, one profile `id * 10` and one
/// detail `id * 100` on that profile. Injected failures fire once.
pub struct MemorySource {
    ids: Vec<EntityId>,
    failing_offsets: Mutex<HashSet<u64>>,
    failing_cursors: Mutex<HashSet<EntityId>>,
    shutdown_after: Mutex<Option<(usize, Arc<watch::Sender<bool>>)>>,
    report_fetches: AtomicUsize,
    reported_count: Option<u64>,
    fetch_delay: Option<Duration>,
}

impl MemorySource {
    pub fn new(ids: &[EntityId]) -> Self {
        Self {
            ids: ids.to_vec(),
            failing_offsets: Mutex::new(HashSet::new()),
            failing_cursors: Mutex::new(HashSet::new()),
            shutdown_after: Mutex::new(None),
            report_fetches: AtomicUsize::new(0),
            reported_count: None,
            fetch_delay: None,
        }
    }

    /// Report `count` rows regardless of the id set, as if rows were
    /// deleted after counting
    pub fn with_reported_count(mut self, count: u64) -> Self {
        self.reported_count = Some(count);
        self
    }

    /// Sleep for `delay` after each report fetch, before returning rows
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    /// Fail the next offset fetch starting at `offset`
    pub fn failing_offset(self, offset: u64) -> Self {
        self.failing_offsets.lock().unwrap().insert(offset);
        self
    }

    /// Fail the next keyset fetch after `last_id`
    pub fn failing_cursor(self, last_id: EntityId) -> Self {
        self.failing_cursors.lock().unwrap().insert(last_id);
        self
    }

    /// Flip `signal` once `fetches` report fetches have completed
    pub fn shutdown_after(self, fetches: usize, signal: Arc<watch::Sender<bool>>) -> Self {
        *self.shutdown_after.lock().unwrap() = Some((fetches, signal));
        self
    }

    pub fn report_fetches(&self) -> usize {
        self.report_fetches.load(Ordering::SeqCst)
    }

    async fn count_fetch(&self) {
        let done = self.report_fetches.fetch_add(1, Ordering::SeqCst) + 1;
        let signal = self
            .shutdown_after
            .lock()
            .unwrap()
            .as_ref()
            .filter(|(after, _)| done >= *after)
            .map(|(_, signal)| signal.clone());
        if let Some(signal) = signal {
            let _ = signal.send(true);
        }
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl RowSource for MemorySource {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn count_reports(&self) -> Result<u64> {
        Ok(self.reported_count.unwrap_or(self.ids.len() as u64))
    }

    async fn fetch_reports_page(&self, offset: u64, limit: u64) -> Result<Vec<ReportRow>> {
        self.count_fetch().await;
        if self.failing_offsets.lock().unwrap().remove(&offset) {
            return Err(RelexError::Database(format!("injected failure at offset {offset}")));
        }
        Ok(self
            .ids
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|id| report(*id))
            .collect())
    }

    async fn fetch_report_after(&self, last_id: EntityId) -> Result<Option<ReportRow>> {
        self.count_fetch().await;
        if self.failing_cursors.lock().unwrap().remove(&last_id) {
            return Err(RelexError::Database(format!("injected failure after id {last_id}")));
        }
        Ok(self.ids.iter().find(|id| **id > last_id).map(|id| report(*id)))
    }

    async fn report_id_at(&self, ordinal: u64) -> Result<Option<EntityId>> {
        Ok(self.ids.get(ordinal as usize).copied())
    }

    async fn fetch_articles(&self, report_ids: &[EntityId]) -> Result<Vec<ArticleRow>> {
        Ok(report_ids.iter().map(|id| article(id * 10, *id)).collect())
    }

    async fn fetch_profiles(&self, report_ids: &[EntityId]) -> Result<Vec<ProfileRow>> {
        Ok(report_ids.iter().map(|id| profile(id * 10, *id)).collect())
    }

    async fn fetch_profile_details(&self, report_ids: &[EntityId]) -> Result<Vec<DetailRow>> {
        Ok(report_ids.iter().map(|id| detail(id * 100, id * 10)).collect())
    }

    fn describe(&self) -> String {
        format!("memory ({} reports)", self.ids.len())
    }
}

/// Manifest storage whose appends always fail
pub struct BrokenManifest;

#[async_trait]
impl ManifestStorage for BrokenManifest {
    async fn append(&self, _entry: &ManifestEntry) -> Result<()> {
        Err(RelexError::Manifest("disk full".to_string()))
    }

    async fn last_success(
        &self,
        _batch_number: BatchNumber,
        _page_index: u64,
    ) -> Result<Option<ManifestEntry>> {
        Ok(None)
    }

    async fn list_entries(&self) -> Result<Vec<ManifestEntry>> {
        Ok(Vec::new())
    }
}

pub fn config(export_section: &str) -> RelexConfig {
    parse_config(&format!(
        r#"
[source]
connection_string = "postgresql://relex:pw@localhost:5432/reports"

[destination]
url = "memory://"
prefix = "exports"

[manifest]
backend = "file"

[export]
{export_section}
"#
    ))
    .unwrap()
}

/// Object store, file manifest and shutdown channel shared across runs
pub struct Harness {
    pub dir: TempDir,
    pub store: Arc<InMemory>,
    pub manifest: Arc<FileManifestStorage>,
    pub config: RelexConfig,
    pub shutdown_tx: Arc<watch::Sender<bool>>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Harness {
    pub fn new(export_section: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Arc::new(FileManifestStorage::new(dir.path().join("manifest.jsonl")).unwrap());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            dir,
            store: Arc::new(InMemory::new()),
            manifest,
            config: config(export_section),
            shutdown_tx: Arc::new(shutdown_tx),
            shutdown_rx,
        }
    }

    pub fn coordinator(&self, source: Arc<MemorySource>) -> ExportCoordinator {
        let destination = ObjectStoreDestination::from_store(self.store.clone(), "memory");
        ExportCoordinator::from_parts(
            self.config.clone(),
            source,
            self.manifest.clone(),
            Arc::new(destination),
            self.shutdown_rx.clone(),
        )
    }

    pub async fn object(&self, key: &str) -> Option<Vec<u8>> {
        match self.store.get(&ObjectPath::from(key)).await {
            Ok(result) => Some(result.bytes().await.unwrap().to_vec()),
            Err(object_store::Error::NotFound { .. }) => None,
            Err(e) => panic!("unexpected store error: {e}"),
        }
    }

    pub async fn entries(&self) -> Vec<ManifestEntry> {
        self.manifest.list_entries().await.unwrap()
    }
}
