//! Migration runner - forward execution engine.
//!
//! Reads the current schema version from the config store, walks discovered
//! migrations in ascending order, executes the pending window through the
//! statement executor, and persists each applied version immediately so an
//! interrupted run resumes from the last completed step.

use std::collections::BTreeMap;

use tracing::{error, info};

use super::definitions::{ExecutionResult, MigrationReport, RunOutcome, PREFIX_PLACEHOLDER};
use super::manager::MigrationManager;
use crate::error::{MigrationError, MigrationResult};
use crate::store::{ConfigStore, StatementExecutor};
use crate::version::SchemaVersion;

/// Applies pending migrations through the injected collaborators.
pub struct MigrationRunner<C: ConfigStore, E: StatementExecutor> {
    manager: MigrationManager,
    store: C,
    executor: E,
}

impl<C: ConfigStore, E: StatementExecutor> MigrationRunner<C, E> {
    /// Create a runner from a manager and the host's collaborators.
    pub fn new(manager: MigrationManager, store: C, executor: E) -> Self {
        Self {
            manager,
            store,
            executor,
        }
    }

    /// Get the migration manager.
    pub fn manager(&self) -> &MigrationManager {
        &self.manager
    }

    /// Get the config store.
    pub fn store(&self) -> &C {
        &self.store
    }

    /// Get the statement executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Current schema version from the config store.
    ///
    /// An installation that has never run a migration has no recorded value
    /// and reports the baseline `1.0.0`.
    pub fn current_version(&self) -> MigrationResult<SchemaVersion> {
        match self.store.get(&self.manager.config().version_key) {
            Some(raw) => raw.parse(),
            None => Ok(SchemaVersion::baseline()),
        }
    }

    /// Record `version` as the current schema version.
    pub fn set_current_version(&mut self, version: &SchemaVersion) -> MigrationResult<()> {
        let key = self.manager.config().version_key.clone();
        if !self.store.set(&key, &version.to_string()) {
            return Err(MigrationError::Configuration(format!(
                "failed to record schema version {}",
                version
            )));
        }
        Ok(())
    }

    /// Run all pending migrations up to and including `target`.
    ///
    /// Migrations at or below the current version, or above `target`, are
    /// skipped. Each applied version is persisted before the next one runs.
    /// The first failing migration stops the run: its version and message go
    /// into the report's outcome, the per-version results gathered so far are
    /// retained, and already-applied migrations stay applied. On full success
    /// `target` itself is persisted, which permits a version bump past the
    /// highest migration on disk.
    pub fn run_migrations(&mut self, target: &SchemaVersion) -> MigrationResult<MigrationReport> {
        let current = self.current_version()?;
        let available = self.manager.available_migrations()?;

        let mut results = BTreeMap::new();

        for (version, path) in &available {
            if version <= &current {
                continue;
            }
            if version > target {
                continue;
            }

            info!(version = %version, "applying migration");
            let result = match self.manager.load_statements(path) {
                Ok(statements) => self.execute_statements(&statements),
                Err(e) => ExecutionResult::failed(0, e.to_string()),
            };
            let success = result.success;
            let message = result.error.clone().unwrap_or_default();
            results.insert(version.clone(), result);

            if !success {
                error!(version = %version, message = %message, "migration failed");
                return Ok(MigrationReport {
                    results,
                    outcome: RunOutcome::Failed {
                        version: version.clone(),
                        message,
                    },
                });
            }

            self.set_current_version(version)?;
        }

        // Forward execution never lowers the recorded version; reaching a
        // lower version is rollback_to's job.
        if target > &current {
            self.set_current_version(target)?;
        }

        Ok(MigrationReport {
            results,
            outcome: RunOutcome::Complete,
        })
    }

    /// True when at least one discovered migration falls in the window
    /// `current < v <= target`.
    pub fn has_pending_migrations(&self, target: &SchemaVersion) -> MigrationResult<bool> {
        let current = self.current_version()?;
        if current >= *target {
            return Ok(false);
        }

        let available = self.manager.available_migrations()?;
        Ok(available.keys().any(|v| *v > current && v <= target))
    }

    /// Versions `run_migrations(target)` would apply, ascending.
    pub fn pending_migrations(&self, target: &SchemaVersion) -> MigrationResult<Vec<SchemaVersion>> {
        let current = self.current_version()?;
        let available = self.manager.available_migrations()?;
        Ok(available
            .keys()
            .filter(|v| **v > current && *v <= target)
            .cloned()
            .collect())
    }

    /// Execute one migration's statement list.
    ///
    /// Every occurrence of the prefix placeholder is replaced with the
    /// configured table prefix before submission. Statements are not wrapped
    /// in a transaction; on the first failure `queries` reports how many ran.
    pub(crate) fn execute_statements(&mut self, statements: &[String]) -> ExecutionResult {
        let prefix = self.manager.config().table_prefix.clone();
        let mut executed = 0;

        for template in statements {
            let statement = template.replace(PREFIX_PLACEHOLDER, &prefix);
            if let Err(e) = self.executor.execute(&statement) {
                return ExecutionResult::failed(executed, e.message);
            }
            executed += 1;
        }

        ExecutionResult::applied(executed)
    }
}
