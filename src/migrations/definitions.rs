//! Core types for the migration system.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::version::SchemaVersion;

/// Placeholder token replaced with the deployment's table-name prefix before
/// a statement is executed.
pub const PREFIX_PLACEHOLDER: &str = "PREFIX_";

/// File suffix for forward migration files (`<version>.json`).
pub const MIGRATION_SUFFIX: &str = ".json";

/// File suffix for rollback files (`<version>.rollback.json`).
pub const ROLLBACK_SUFFIX: &str = ".rollback.json";

/// Configuration for the migration system.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// Directory where migration files are stored
    pub migrations_dir: PathBuf,
    /// Config-store key holding the current schema version
    pub version_key: String,
    /// Deployment table-name prefix substituted for [`PREFIX_PLACEHOLDER`]
    pub table_prefix: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            migrations_dir: PathBuf::from("sql/migrations"),
            version_key: "SHOPKIT_DB_VERSION".to_string(),
            table_prefix: "shop_".to_string(),
        }
    }
}

/// A migration: the ordered statement templates for one version.
///
/// Built by loading a discovered file; never mutated afterwards. Rollback
/// records share this shape, keyed by the same version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Migration {
    /// Version this migration upgrades the schema to
    pub version: SchemaVersion,
    /// SQL statement templates, applied in order
    pub statements: Vec<String>,
}

/// Result of attempting one migration (or one rollback).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Whether every statement ran
    pub success: bool,
    /// Statements executed before stopping
    pub queries: usize,
    /// Engine message for the failing statement, if any
    pub error: Option<String>,
}

impl ExecutionResult {
    pub(crate) fn applied(queries: usize) -> Self {
        Self {
            success: true,
            queries,
            error: None,
        }
    }

    pub(crate) fn failed(queries: usize, error: impl Into<String>) -> Self {
        Self {
            success: false,
            queries,
            error: Some(error.into()),
        }
    }
}

/// Overall outcome of a forward or rollback run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every eligible migration was processed
    Complete,
    /// Execution stopped at the named version; earlier steps stay applied
    Failed {
        version: SchemaVersion,
        message: String,
    },
}

impl RunOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, RunOutcome::Complete)
    }
}

/// Per-version results plus the overall outcome of a run.
///
/// A fatal failure does not discard the report: the versions applied before
/// the failure keep their entries in `results`, and `outcome` names the
/// version that stopped the run.
#[derive(Debug, Clone)]
pub struct MigrationReport {
    /// Result per attempted version, in ascending version order
    pub results: BTreeMap<SchemaVersion, ExecutionResult>,
    /// Whether the run completed or where it stopped
    pub outcome: RunOutcome,
}

impl MigrationReport {
    pub(crate) fn empty() -> Self {
        Self {
            results: BTreeMap::new(),
            outcome: RunOutcome::Complete,
        }
    }

    /// True when no migration was attempted.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
