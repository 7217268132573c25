use super::*;
use crate::outcome::RowCounts;
use ms_core::{MemoryBlobReader, RunConfig};
use ms_db::recording::{Call, RecordingExecutor};
use ms_db::ExecResult;
use std::path::Path;

const USERS_SQL: &str = "INSERT INTO users (id, name) VALUES (1, 'ada'), (2, 'grace')";
const ORDERS_SQL: &str = "INSERT IGNORE INTO orders (id) VALUES (1), (2), (3)";

fn roots() -> Roots {
    let config =
        RunConfig::from_yaml("connection:\n  host: localhost\n  user: root\n").unwrap();
    Roots::from_config(&config, Path::new("/p"))
}

fn blobs() -> MemoryBlobReader {
    MemoryBlobReader::new()
        .with_file("/p/initial-data/shop/users.sql", USERS_SQL)
        .with_file("/p/initial-data/shop/orders.sql", ORDERS_SQL)
}

fn targets(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

#[tokio::test]
async fn test_seeds_empty_tables() {
    let db = RecordingExecutor::new()
        .on_script(USERS_SQL, ExecResult::new(2, 0))
        .on_script(ORDERS_SQL, ExecResult::new(3, 0));
    let blobs = blobs();
    let roots = roots();

    let report = DataSeeder::new(&db, &blobs, &roots)
        .apply(&targets(&["shop/users", "shop/orders"]))
        .await;

    assert_eq!(report.created(), 2);
    assert_eq!(report.targets[0].description, "shop.users");
    assert_eq!(
        report.targets[0].rows,
        Some(RowCounts {
            inserted: 2,
            duplicates: 0
        })
    );
    assert_eq!(
        db.calls(),
        vec![
            Call::CountRows("shop".to_string(), "users".to_string()),
            Call::Execute(USERS_SQL.to_string()),
            Call::CountRows("shop".to_string(), "orders".to_string()),
            Call::Execute(ORDERS_SQL.to_string()),
        ]
    );
}

#[tokio::test]
async fn test_non_empty_table_is_never_executed() {
    let db = RecordingExecutor::new().with_rows("shop", "users", 5);
    let blobs = blobs();
    let roots = roots();

    let report = DataSeeder::new(&db, &blobs, &roots)
        .apply(&targets(&["shop/users"]))
        .await;

    assert_eq!(
        report.targets[0].outcome,
        ApplyOutcome::Skipped(SkipReason::TableNotEmpty { rows: 5 })
    );
    assert_eq!(report.created(), 0);
    assert!(db.executed_scripts().is_empty());
}

#[tokio::test]
async fn test_count_runs_even_for_guarded_inserts() {
    // INSERT IGNORE would be safe to rerun, but a populated table is still left alone
    let db = RecordingExecutor::new().with_rows("shop", "orders", 1);
    let blobs = blobs();
    let roots = roots();

    DataSeeder::new(&db, &blobs, &roots)
        .apply(&targets(&["shop/orders"]))
        .await;

    assert_eq!(
        db.calls(),
        vec![Call::CountRows("shop".to_string(), "orders".to_string())]
    );
}

#[tokio::test]
async fn test_duplicates_from_warnings() {
    let db = RecordingExecutor::new().on_script(ORDERS_SQL, ExecResult::new(1, 2));
    let blobs = blobs();
    let roots = roots();

    let report = DataSeeder::new(&db, &blobs, &roots)
        .apply(&targets(&["shop/orders"]))
        .await;

    assert_eq!(
        report.targets[0].rows,
        Some(RowCounts {
            inserted: 1,
            duplicates: 2
        })
    );
}

#[tokio::test]
async fn test_duplicates_ignored_when_configured() {
    let db = RecordingExecutor::new().on_script(ORDERS_SQL, ExecResult::new(1, 2));
    let blobs = blobs();
    let roots = roots();

    let report = DataSeeder::new(&db, &blobs, &roots)
        .with_duplicates(SeedDuplicates::Ignore)
        .apply(&targets(&["shop/orders"]))
        .await;

    assert_eq!(report.targets[0].rows.map(|r| r.duplicates), Some(0));
}

#[tokio::test]
async fn test_read_error_skips_count_and_continues() {
    let db = RecordingExecutor::new();
    let blobs = blobs().with_unreadable("/p/initial-data/shop/users.sql");
    let roots = roots();

    let report = DataSeeder::new(&db, &blobs, &roots)
        .apply(&targets(&["shop/users", "shop/orders"]))
        .await;

    assert!(matches!(
        report.targets[0].outcome,
        ApplyOutcome::Failed(FailureReason::Read(_))
    ));
    assert_eq!(report.created(), 1);
    assert!(!db
        .calls()
        .contains(&Call::CountRows("shop".to_string(), "users".to_string())));
}

#[tokio::test]
async fn test_count_failure_is_per_target() {
    let db = RecordingExecutor::new().with_count_error(
        "shop",
        "users",
        "Table 'shop.users' doesn't exist",
    );
    let blobs = blobs();
    let roots = roots();

    let report = DataSeeder::new(&db, &blobs, &roots)
        .apply(&targets(&["shop/users", "shop/orders"]))
        .await;

    assert!(matches!(
        report.targets[0].outcome,
        ApplyOutcome::Failed(FailureReason::Count(_))
    ));
    assert_eq!(report.targets[1].outcome, ApplyOutcome::Created);
    assert_eq!(db.executed_scripts(), vec![ORDERS_SQL]);
}

#[tokio::test]
async fn test_execution_error_is_per_target() {
    let db = RecordingExecutor::new()
        .failing_script(USERS_SQL, "Duplicate entry '1' for key 'PRIMARY'");
    let blobs = blobs();
    let roots = roots();

    let report = DataSeeder::new(&db, &blobs, &roots)
        .apply(&targets(&["shop/users", "shop/orders"]))
        .await;

    assert!(matches!(
        report.targets[0].outcome,
        ApplyOutcome::Failed(FailureReason::Execute(_))
    ));
    assert_eq!(report.targets[0].rows, None);
    assert_eq!(report.created(), 1);
}

#[tokio::test]
async fn test_schema_shaped_target_is_malformed() {
    let db = RecordingExecutor::new();
    let blobs = blobs();
    let roots = roots();

    let report = DataSeeder::new(&db, &blobs, &roots)
        .apply(&targets(&["shop/tables/users"]))
        .await;

    assert!(matches!(
        report.targets[0].outcome,
        ApplyOutcome::Skipped(SkipReason::MalformedTarget { .. })
    ));
    assert!(db.calls().is_empty());
}

#[tokio::test]
async fn test_shared_data_target() {
    let config = RunConfig::from_yaml(
        "connection:\n  host: localhost\n  user: root\nshared:\n  data: [common/settings]\n",
    )
    .unwrap();
    let roots = Roots::from_config(&config, Path::new("/p"));
    let blobs = MemoryBlobReader::new().with_file(
        "/p/shared/initial-data/common/settings.sql",
        "INSERT INTO settings VALUES ('theme', 'dark')",
    );
    let db = RecordingExecutor::new();

    let report = DataSeeder::new(&db, &blobs, &roots)
        .apply(&targets(&["common/settings"]))
        .await;

    assert_eq!(report.created(), 1);
}
