//! Migration system: discovery, forward execution, rollback.

pub mod definitions;
pub mod manager;
pub mod rollback;
pub mod runner;

pub use definitions::*;
pub use manager::MigrationManager;
pub use rollback::{MigrationRollback, ROLLBACK_NOT_FOUND};
pub use runner::MigrationRunner;
