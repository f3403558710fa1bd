//! Collaborator interfaces supplied by the host platform.
//!
//! The migration system owns none of its durable state: the current schema
//! version lives in the host's key-value configuration store, and statements
//! run through whatever database handle the host provides. Both sit behind
//! traits so a run can be exercised end to end without a database.

use std::collections::HashMap;
use std::fmt;

/// Error reported by a [`StatementExecutor`] for one failed statement.
#[derive(Debug, Clone)]
pub struct StatementError {
    /// Message from the underlying database engine.
    pub message: String,
}

impl StatementError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StatementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Statement error: {}", self.message)
    }
}

impl std::error::Error for StatementError {}

/// Persistent key-value configuration store.
///
/// The migration system uses a single fixed key to record the current schema
/// version.
pub trait ConfigStore {
    /// Read a value; `None` when the key has never been written.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value; `false` signals the store rejected the write.
    fn set(&mut self, key: &str, value: &str) -> bool;
}

/// Executes one SQL statement against the deployment's database.
///
/// The first `Err` during a migration stops that migration; the message is
/// surfaced verbatim in the run report.
pub trait StatementExecutor {
    fn execute(&mut self, statement: &str) -> Result<(), StatementError>;
}

/// HashMap-backed [`ConfigStore`].
///
/// Backs the crate's own tests and gives integrators a harness; real
/// deployments wrap the platform's configuration table instead.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    values: HashMap<String, String>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.values.insert(key.to_string(), value.to_string());
        true
    }
}

/// [`StatementExecutor`] that records every statement it accepts.
///
/// Can be scripted to fail once a given number of statements have been
/// accepted, which makes fail-fast and partial-application paths testable
/// without a database.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    executed: Vec<String>,
    fail_after: Option<(usize, String)>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executor that accepts `accepted` statements and then fails with
    /// `message`. Statements after the failure are accepted again.
    pub fn failing_after(accepted: usize, message: impl Into<String>) -> Self {
        Self {
            executed: Vec::new(),
            fail_after: Some((accepted, message.into())),
        }
    }

    /// Statements accepted so far, in submission order.
    pub fn executed(&self) -> &[String] {
        &self.executed
    }
}

impl StatementExecutor for RecordingExecutor {
    fn execute(&mut self, statement: &str) -> Result<(), StatementError> {
        if let Some((accepted, message)) = self.fail_after.take() {
            if self.executed.len() == accepted {
                return Err(StatementError::new(message));
            }
            self.fail_after = Some((accepted, message));
        }
        self.executed.push(statement.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_values() {
        let mut store = MemoryConfigStore::new();
        assert_eq!(store.get("DB_VERSION"), None);
        assert!(store.set("DB_VERSION", "1.1.0"));
        assert_eq!(store.get("DB_VERSION"), Some("1.1.0".to_string()));
        assert!(store.set("DB_VERSION", "1.2.0"));
        assert_eq!(store.get("DB_VERSION"), Some("1.2.0".to_string()));
    }

    #[test]
    fn recording_executor_logs_in_order() {
        let mut executor = RecordingExecutor::new();
        executor.execute("CREATE TABLE a (id INT)").unwrap();
        executor.execute("CREATE TABLE b (id INT)").unwrap();
        assert_eq!(
            executor.executed(),
            &["CREATE TABLE a (id INT)", "CREATE TABLE b (id INT)"]
        );
    }

    #[test]
    fn scripted_failure_fires_after_the_accepted_count() {
        let mut executor = RecordingExecutor::failing_after(1, "duplicate column");
        executor.execute("one").unwrap();
        let err = executor.execute("two").unwrap_err();
        assert_eq!(err.message, "duplicate column");
        // the failing statement is not counted as executed
        assert_eq!(executor.executed(), &["one"]);
    }
}
