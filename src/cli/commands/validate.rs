//! Validate config command implementation
//!
//! Loads the configuration and resolves every named query it needs, without
//! connecting to anything.

use crate::adapters::database::factory::required_queries;
use crate::adapters::database::resolve_queries;
use crate::config::{load_config, redacted_dsn};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("Configuration is valid");
                c
            }
            Err(e) => {
                println!("Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let names = required_queries(&config);
        if let Err(e) = resolve_queries(&config, &names) {
            println!("Query catalog is incomplete");
            println!("   Error: {e}");
            return Ok(2);
        }
        println!("All {} named queries resolved", names.len());

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Source: {}", redacted_dsn(&config.source.connection_string));
        println!("  Max Connections: {}", config.source.max_connections);
        println!("  Pagination Mode: {}", config.export.pagination_mode);
        println!("  Page Size: {}", config.export.page_size);
        println!("  Batch Count: {}", config.export.batch_count);
        println!("  Destination: {}", config.destination.url);
        println!("  Key Prefix: {}", config.destination.prefix);
        println!("  Region: {}", config.destination.region);
        println!("  Manifest Backend: {:?}", config.manifest.backend);
        println!("  Queries: {}", config.queries.base_path);
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &std::path::Path, base_path: &std::path::Path) -> String {
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

[queries]
base_path = "{}"
"#,
                base_path.display()
            ),
        )
        .unwrap();
        path.to_string_lossy().to_string()
    }

    #[tokio::test]
    async fn test_validate_reports_missing_queries() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), &dir.path().join("sql"));

        let code = ValidateArgs {}.execute(&path).await.unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_with_complete_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let sql = dir.path().join("sql");
        std::fs::create_dir_all(&sql).unwrap();
        for name in crate::adapters::database::factory::SOURCE_QUERIES {
            std::fs::write(sql.join(format!("{name}.sql")), "SELECT 1").unwrap();
        }
        let path = write(dir.path(), &sql);

        let code = ValidateArgs {}.execute(&path).await.unwrap();
        assert_eq!(code, 0);
    }
}
