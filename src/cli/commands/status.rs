//! Status command implementation
//!
//! This module implements the `status` command, a per-batch rollup of the
//! manifest.

use crate::adapters::database::create_manifest_storage;
use crate::config::load_config;
use crate::core::manifest::{summarize_by_batch, ManifestLedger};
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    /// Only show this batch number
    #[arg(long)]
    pub batch: Option<u32>,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking export status");

        println!("Export Status");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let storage = match create_manifest_storage(&config).await {
            Ok(s) => s,
            Err(e) => {
                println!("Failed to open manifest");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        let entries = match ManifestLedger::new(storage).entries().await {
            Ok(entries) => entries,
            Err(e) => {
                println!("Failed to load manifest entries");
                println!("   Error: {e}");
                return Ok(5);
            }
        };

        if entries.is_empty() {
            println!("No export history found.");
            println!("Run 'relex' to start exporting.");
            return Ok(0);
        }

        let progress: Vec<_> = summarize_by_batch(&entries)
            .into_iter()
            .filter(|(batch, _)| self.batch.map_or(true, |b| b == *batch))
            .collect();

        if progress.is_empty() {
            println!("No manifest entries for the requested batch.");
            return Ok(0);
        }

        println!(
            "{:<8} {:<12} {:<14} {:<14} {:<10}",
            "Batch", "Pages Done", "Pages Failed", "Rows", "Attempts"
        );
        println!("{}", "-".repeat(62));

        for (batch, p) in progress {
            println!(
                "{:<8} {:<12} {:<14} {:<14} {:<10}",
                batch, p.pages_done, p.pages_failed, p.rows_exported, p.attempts
            );
        }

        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::ManifestEntry;
    use crate::domain::ids::{BatchNumber, ObjectKey};
    use chrono::Utc;

    fn write_config(dir: &std::path::Path) -> String {
        let path = dir.join("relex.toml");
        std::fs::write(
            &path,
            format!(
                r#"
[source]
connection_string = "postgresql://relex:pw@localhost:5432/reports"

[destination]
url = "memory://"

[manifest]
backend = "file"
path = "{}"
"#,
                dir.join("manifest.jsonl").display()
            ),
        )
        .unwrap();
        path.to_string_lossy().to_string()
    }

    #[tokio::test]
    async fn test_status_with_empty_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path());

        let code = StatusArgs::default().execute(&path).await.unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_status_reads_file_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path());

        let storage =
            crate::adapters::local::FileManifestStorage::new(dir.path().join("manifest.jsonl"))
                .unwrap();
        let ledger = ManifestLedger::new(std::sync::Arc::new(storage));
        let batch = BatchNumber::new(1).unwrap();
        let key = ObjectKey::for_page("exports", batch, 0, None);
        ledger
            .append(&ManifestEntry::success(batch, 0, &key, 5, None, Utc::now()))
            .await
            .unwrap();

        let code = StatusArgs { batch: Some(1) }.execute(&path).await.unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_status_missing_config() {
        let code = StatusArgs::default()
            .execute("/nonexistent/relex.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
