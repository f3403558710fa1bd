//! # shopkit-migrate: versioned schema migrations for shop extension modules
//!
//! Tracks an installed schema version in the host platform's key-value
//! configuration store, discovers ordered migration files on disk, applies
//! only the pending ones through an injected statement executor, persists
//! progress after each step, and supports rolling back to an earlier version.
//!
//! Migration files live in one directory and are pure data: a JSON array of
//! SQL statement templates, named `<version>.json` (forward) or
//! `<version>.rollback.json` (rollback), where `<version>` is a strict
//! `MAJOR.MINOR.PATCH` string. A `PREFIX_` token in a template is replaced
//! with the deployment's table-name prefix before execution.
//!
//! ```no_run
//! use shopkit_migrate::{
//!     MemoryConfigStore, MigrationManager, MigrationRunner, RecordingExecutor, SchemaVersion,
//! };
//!
//! # fn main() -> Result<(), shopkit_migrate::MigrationError> {
//! let manager = MigrationManager::new();
//! let mut runner = MigrationRunner::new(manager, MemoryConfigStore::new(), RecordingExecutor::new());
//!
//! let target = SchemaVersion::new(1, 2, 0);
//! if runner.has_pending_migrations(&target)? {
//!     let report = runner.run_migrations(&target)?;
//!     assert!(report.outcome.is_complete());
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod migrations;
pub mod store;
pub mod version;

// Re-export core traits and types
pub use error::*;
pub use migrations::*;
pub use store::*;
pub use version::*;
