//! Migration manager - filesystem discovery and statement loading.
//!
//! Finds migration files in the configured directory and loads their
//! statement lists. Migration files are pure data: a JSON array of SQL
//! statement templates, named `<version>.json` for forward migrations and
//! `<version>.rollback.json` for rollbacks.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::definitions::{Migration, MigrationConfig, MIGRATION_SUFFIX, ROLLBACK_SUFFIX};
use crate::error::{MigrationError, MigrationResult};
use crate::version::SchemaVersion;

/// Discovers migration files and loads their statement lists.
pub struct MigrationManager {
    config: MigrationConfig,
}

impl MigrationManager {
    /// Create a manager with default configuration.
    pub fn new() -> Self {
        Self::with_config(MigrationConfig::default())
    }

    /// Create a manager with custom configuration.
    pub fn with_config(config: MigrationConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Forward migrations available on disk, keyed ascending by version.
    ///
    /// Filenames whose stem is not an exact `MAJOR.MINOR.PATCH` version are
    /// skipped silently; a missing directory yields an empty map.
    pub fn available_migrations(&self) -> MigrationResult<BTreeMap<SchemaVersion, PathBuf>> {
        self.scan(MIGRATION_SUFFIX)
    }

    /// Rollback files available on disk, keyed ascending by version.
    pub fn available_rollbacks(&self) -> MigrationResult<BTreeMap<SchemaVersion, PathBuf>> {
        self.scan(ROLLBACK_SUFFIX)
    }

    fn scan(&self, suffix: &str) -> MigrationResult<BTreeMap<SchemaVersion, PathBuf>> {
        let mut found = BTreeMap::new();

        if !self.config.migrations_dir.is_dir() {
            return Ok(found);
        }

        let entries = fs::read_dir(&self.config.migrations_dir).map_err(|e| {
            MigrationError::Discovery(format!("failed to read migrations directory: {}", e))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                MigrationError::Discovery(format!("failed to read directory entry: {}", e))
            })?;
            let path = entry.path();

            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(stem) = name.strip_suffix(suffix) else {
                continue;
            };
            // A rollback file's stem ends in ".rollback" when scanned with
            // the forward suffix, so the version grammar rejects it here.
            let Some(version) = SchemaVersion::parse(stem) else {
                continue;
            };

            found.insert(version, path);
        }

        Ok(found)
    }

    /// Load the ordered statement list from one migration file.
    pub fn load_statements(&self, path: &Path) -> MigrationResult<Vec<String>> {
        let content = fs::read_to_string(path).map_err(|e| {
            MigrationError::Load(format!(
                "failed to read migration file {}: {}",
                path.display(),
                e
            ))
        })?;

        let statements: Vec<String> = serde_json::from_str(&content).map_err(|e| {
            MigrationError::Load(format!(
                "migration file {} must contain a JSON array of SQL statements: {}",
                path.display(),
                e
            ))
        })?;

        Ok(statements)
    }

    /// Load a full migration record for a discovered version.
    pub fn load_migration(
        &self,
        version: &SchemaVersion,
        path: &Path,
    ) -> MigrationResult<Migration> {
        Ok(Migration {
            version: version.clone(),
            statements: self.load_statements(path)?,
        })
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}
