//! Error types for the migration system.
//!
//! These cover infrastructure problems only: an unreadable migrations
//! directory, a malformed migration file, a bad version string, a rejected
//! config-store write. A migration whose statements fail against the database
//! is not an error at this level — it is reported through
//! [`RunOutcome::Failed`](crate::migrations::RunOutcome) so the per-version
//! results of the run are retained.

use thiserror::Error;

/// Result type alias for migration operations.
pub type MigrationResult<T> = Result<T, MigrationError>;

/// Error types for migration operations.
#[derive(Debug, Clone, Error)]
pub enum MigrationError {
    /// Filesystem problem while discovering migration files
    #[error("Discovery error: {0}")]
    Discovery(String),
    /// A migration file could not be read or parsed
    #[error("Load error: {0}")]
    Load(String),
    /// Version-state read or write through the config store failed
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// A version string does not match the `MAJOR.MINOR.PATCH` grammar
    #[error("Invalid version: {0}")]
    Version(String),
}
