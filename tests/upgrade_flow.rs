//! End-to-end upgrade and rollback flow against the in-memory collaborators.

use std::fs;

use tempfile::TempDir;

use shopkit_migrate::{
    ConfigStore, MemoryConfigStore, MigrationConfig, MigrationManager, MigrationRollback,
    MigrationRunner, RecordingExecutor, SchemaVersion, ROLLBACK_NOT_FOUND,
};

const VERSION_KEY: &str = "SHOPKIT_DB_VERSION";

fn version(s: &str) -> SchemaVersion {
    SchemaVersion::parse(s).unwrap()
}

fn write_file(dir: &TempDir, name: &str, statements: &[&str]) {
    fs::write(
        dir.path().join(name),
        serde_json::to_string(statements).unwrap(),
    )
    .unwrap();
}

#[test]
fn upgrade_then_rollback_round_trip() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "1.1.0.json",
        &[
            "ALTER TABLE `PREFIX_item` ADD COLUMN `slug` VARCHAR(255)",
            "CREATE INDEX `idx_slug` ON `PREFIX_item` (`slug`)",
        ],
    );
    write_file(
        &dir,
        "1.1.0.rollback.json",
        &[
            "DROP INDEX `idx_slug` ON `PREFIX_item`",
            "ALTER TABLE `PREFIX_item` DROP COLUMN `slug`",
        ],
    );
    // 1.2.0 is forward-only
    write_file(
        &dir,
        "1.2.0.json",
        &["ALTER TABLE `PREFIX_item` ADD COLUMN `active` TINYINT DEFAULT 1"],
    );

    let manager = MigrationManager::with_config(MigrationConfig {
        migrations_dir: dir.path().to_path_buf(),
        table_prefix: "ps_".to_string(),
        ..MigrationConfig::default()
    });
    let mut runner = MigrationRunner::new(manager, MemoryConfigStore::new(), RecordingExecutor::new());

    // Fresh install reports the baseline and has work to do.
    assert_eq!(runner.current_version().unwrap(), version("1.0.0"));
    assert!(runner.has_pending_migrations(&version("1.2.0")).unwrap());
    assert_eq!(
        runner.pending_migrations(&version("1.2.0")).unwrap(),
        vec![version("1.1.0"), version("1.2.0")]
    );

    // Upgrade applies both migrations with the prefix substituted.
    let report = runner.run_migrations(&version("1.2.0")).unwrap();
    assert!(report.outcome.is_complete());
    assert_eq!(report.results.len(), 2);
    assert_eq!(runner.store().get(VERSION_KEY), Some("1.2.0".to_string()));
    assert_eq!(runner.executor().executed().len(), 3);
    assert!(runner
        .executor()
        .executed()
        .iter()
        .all(|s| s.contains("ps_item")));

    // Nothing pending once the target is reached.
    assert!(!runner.has_pending_migrations(&version("1.2.0")).unwrap());

    // Rollback to baseline: 1.2.0 has no rollback file and is skipped,
    // 1.1.0 is rolled back, and the recorded version drops to the target.
    let report = runner.rollback_to(&version("1.0.0")).unwrap();
    assert!(report.outcome.is_complete());

    let gap = &report.results[&version("1.2.0")];
    assert!(!gap.success);
    assert_eq!(gap.error.as_deref(), Some(ROLLBACK_NOT_FOUND));

    let undone = &report.results[&version("1.1.0")];
    assert!(undone.success);
    assert_eq!(undone.queries, 2);

    assert_eq!(runner.store().get(VERSION_KEY), Some("1.0.0".to_string()));
}
