//! Migration rollback - reverse execution engine.
//!
//! Walks discovered migration versions back down towards a target, executing
//! each version's paired rollback file. A version without a rollback file is
//! recorded and skipped; a rollback that fails stops the run and leaves the
//! recorded schema version untouched.

use std::collections::BTreeMap;

use tracing::{error, info, warn};

use super::definitions::{ExecutionResult, MigrationReport, RunOutcome};
use super::runner::MigrationRunner;
use crate::error::MigrationResult;
use crate::store::{ConfigStore, StatementExecutor};
use crate::version::SchemaVersion;

/// Message recorded for a version that has no rollback file.
pub const ROLLBACK_NOT_FOUND: &str = "rollback not found";

/// Extension trait adding rollback support to [`MigrationRunner`].
pub trait MigrationRollback {
    /// Roll the schema back to `target`.
    ///
    /// No-op when `target` is at or above the current version. Eligible
    /// versions (`target < v <= current`) are processed in descending order.
    /// Only after every eligible version has been processed without a fatal
    /// failure is `target` persisted as the current version.
    fn rollback_to(&mut self, target: &SchemaVersion) -> MigrationResult<MigrationReport>;
}

impl<C: ConfigStore, E: StatementExecutor> MigrationRollback for MigrationRunner<C, E> {
    fn rollback_to(&mut self, target: &SchemaVersion) -> MigrationResult<MigrationReport> {
        let current = self.current_version()?;
        if target >= &current {
            return Ok(MigrationReport::empty());
        }

        let migrations = self.manager().available_migrations()?;
        let rollbacks = self.manager().available_rollbacks()?;

        let mut results = BTreeMap::new();

        for version in migrations.keys().rev() {
            if version <= target {
                continue;
            }
            if version > &current {
                continue;
            }

            let Some(path) = rollbacks.get(version) else {
                warn!(version = %version, "no rollback file, skipping");
                results.insert(version.clone(), ExecutionResult::failed(0, ROLLBACK_NOT_FOUND));
                continue;
            };

            info!(version = %version, "rolling back migration");
            let result = match self.manager().load_statements(path) {
                Ok(statements) => self.execute_statements(&statements),
                Err(e) => ExecutionResult::failed(0, e.to_string()),
            };
            let success = result.success;
            let message = result.error.clone().unwrap_or_default();
            results.insert(version.clone(), result);

            if !success {
                error!(version = %version, message = %message, "rollback failed");
                return Ok(MigrationReport {
                    results,
                    outcome: RunOutcome::Failed {
                        version: version.clone(),
                        message,
                    },
                });
            }
        }

        self.set_current_version(target)?;

        Ok(MigrationReport {
            results,
            outcome: RunOutcome::Complete,
        })
    }
}
