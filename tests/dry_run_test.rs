//! Integration tests for dry-run mode
//!
//! These tests verify that dry runs fetch and assemble every page but
//! neither upload nor record anything.

mod common;

use common::{Harness, MemorySource};
use relex::config::parse_config;
use relex::core::export::ExportSummary;
use std::sync::Arc;

#[test]
fn test_dry_run_from_config() {
    let config = parse_config(
        r#"
[application]
dry_run = true

[source]
connection_string = "postgresql://relex:pw@localhost:5432/reports"

[destination]
url = "memory://"
"#,
    )
    .unwrap();

    assert!(config.is_dry_run());
}

#[test]
fn test_export_summary_dry_run_flag() {
    let summary = ExportSummary::new();
    assert!(!summary.dry_run);
}

#[tokio::test]
async fn test_dry_run_writes_no_objects_or_entries() {
    let mut h = Harness::new("page_size = 2");
    h.config.application.dry_run = true;
    let source = Arc::new(MemorySource::new(&[1, 2, 3]));

    let summary = h.coordinator(source.clone()).run_export(None).await.unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.pages_exported, 2);
    assert_eq!(summary.rows_exported, 3);
    assert_eq!(source.report_fetches(), 2);
    assert!(h.object("exports/export_batch1_page0.json").await.is_none());
    assert!(h.entries().await.is_empty());
}

#[tokio::test]
async fn test_dry_run_still_honors_manifest() {
    let mut h = Harness::new("page_size = 2");
    h.coordinator(Arc::new(MemorySource::new(&[1, 2, 3])))
        .run_export(None)
        .await
        .unwrap();

    h.config.application.dry_run = true;
    let source = Arc::new(MemorySource::new(&[1, 2, 3]));
    let summary = h.coordinator(source.clone()).run_export(None).await.unwrap();

    assert_eq!(summary.pages_skipped, 2);
    assert_eq!(source.report_fetches(), 0);
    assert_eq!(h.entries().await.len(), 2);
}
