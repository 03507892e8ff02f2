//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{KeysetContinuity, ManifestBackend, PaginationMode, RelexConfig};
use super::secret::secret_string;
use crate::domain::errors::RelexError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RelexConfig
/// 4. Applies environment variable overrides (RELEX_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`RelexError::Configuration`] if the file cannot be read or
/// parsed, a referenced variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use relex::config::loader::load_config;
///
/// let config = load_config("relex.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RelexConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RelexError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RelexError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses and validates configuration text
///
/// Same pipeline as [`load_config`] minus the file read.
pub fn parse_config(contents: &str) -> Result<RelexConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: RelexConfig = toml::from_str(&contents)
        .map_err(|e| RelexError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        RelexError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| RelexError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RelexError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the RELEX_* prefix
///
/// Environment variables follow the pattern: RELEX_<SECTION>_<KEY>
/// For example: RELEX_EXPORT_BATCH_COUNT, RELEX_DESTINATION_URL
///
/// # Errors
///
/// Returns an error if a numeric or enum override cannot be parsed
fn apply_env_overrides(config: &mut RelexConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("RELEX_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("RELEX_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Source overrides
    if let Ok(val) = std::env::var("RELEX_SOURCE_CONNECTION_STRING") {
        config.source.connection_string = secret_string(val);
    }
    if let Some(val) = parse_var("RELEX_SOURCE_MAX_CONNECTIONS")? {
        config.source.max_connections = val;
    }
    if let Some(val) = parse_var("RELEX_SOURCE_STATEMENT_TIMEOUT_SECONDS")? {
        config.source.statement_timeout_seconds = val;
    }

    // Export overrides
    if let Some(val) = parse_var("RELEX_EXPORT_PAGE_SIZE")? {
        config.export.page_size = val;
    }
    if let Some(val) = parse_var("RELEX_EXPORT_BATCH_COUNT")? {
        config.export.batch_count = val;
    }
    if let Ok(val) = std::env::var("RELEX_EXPORT_PAGINATION_MODE") {
        config.export.pagination_mode = match val.to_lowercase().as_str() {
            "offset" => PaginationMode::Offset,
            "keyset" => PaginationMode::Keyset,
            other => {
                return Err(RelexError::Configuration(format!(
                    "RELEX_EXPORT_PAGINATION_MODE must be offset or keyset, got '{other}'"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("RELEX_EXPORT_KEYSET_CONTINUITY") {
        config.export.keyset_continuity = match val.to_lowercase().as_str() {
            "chained" => KeysetContinuity::Chained,
            "seek" => KeysetContinuity::Seek,
            other => {
                return Err(RelexError::Configuration(format!(
                    "RELEX_EXPORT_KEYSET_CONTINUITY must be chained or seek, got '{other}'"
                )))
            }
        };
    }
    if let Some(val) = parse_var("RELEX_EXPORT_SHUTDOWN_TIMEOUT_SECS")? {
        config.export.shutdown_timeout_secs = val;
    }

    // Destination overrides
    if let Ok(val) = std::env::var("RELEX_DESTINATION_URL") {
        config.destination.url = val;
    }
    if let Ok(val) = std::env::var("RELEX_DESTINATION_PREFIX") {
        config.destination.prefix = val;
    }
    if let Ok(val) = std::env::var("RELEX_DESTINATION_REGION") {
        config.destination.region = val;
    }

    // Manifest overrides
    if let Ok(val) = std::env::var("RELEX_MANIFEST_BACKEND") {
        config.manifest.backend = match val.to_lowercase().as_str() {
            "postgresql" => ManifestBackend::PostgreSQL,
            "file" => ManifestBackend::File,
            other => {
                return Err(RelexError::Configuration(format!(
                    "RELEX_MANIFEST_BACKEND must be postgresql or file, got '{other}'"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("RELEX_MANIFEST_CONNECTION_STRING") {
        config.manifest.connection_string = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("RELEX_MANIFEST_PATH") {
        config.manifest.path = val;
    }

    // Query overrides
    if let Ok(val) = std::env::var("RELEX_QUERIES_BASE_PATH") {
        config.queries.base_path = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("RELEX_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("RELEX_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("RELEX_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(val) => val.trim().parse().map(Some).map_err(|_| {
            RelexError::Configuration(format!("{name} has an invalid value '{val}'"))
        }),
        Err(_) => Ok(None),
    }
}
