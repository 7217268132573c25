use super::*;
use ms_core::MemoryBlobReader;
use std::path::Path;

fn config(yaml_tail: &str) -> RunConfig {
    RunConfig::from_yaml(&format!(
        "connection:\n  host: localhost\n  user: root\n{}",
        yaml_tail
    ))
    .unwrap()
}

#[test]
fn test_plan_orders_schema_before_data() {
    let config = config(
        "definitions: [shop/tables/users, shop/triggers/audit]\ndata: [shop/users]\n",
    );
    let roots = Roots::from_config(&config, Path::new("/srv"));
    let blobs = MemoryBlobReader::new()
        .with_file("/srv/definitions/shop/tables/users.sql", "CREATE TABLE users")
        .with_file("/srv/definitions/shop/triggers/audit.sql", "CREATE TRIGGER audit")
        .with_file("/srv/initial-data/shop/users.sql", "INSERT INTO users VALUES (1)");

    let plan = build_plan(&config, &roots, &blobs);

    let described: Vec<(Phase, &str)> = plan
        .iter()
        .map(|e| (e.phase, e.description.as_str()))
        .collect();
    assert_eq!(
        described,
        vec![
            (Phase::Schema, "Table shop.users"),
            (Phase::Schema, "Trigger shop.audit"),
            (Phase::Data, "shop.users"),
        ]
    );
    assert!(plan.iter().all(|e| e.status == PlanStatus::Ready));
    assert_eq!(
        plan[0].path.as_deref(),
        Some("/srv/definitions/shop/tables/users.sql")
    );
}

#[test]
fn test_plan_reports_problems_per_target() {
    let config = config(
        "definitions: [shop/views/v, shop/tables/missing, \"my shop/tables/users\"]\n",
    );
    let roots = Roots::from_config(&config, Path::new("/srv"));
    let blobs = MemoryBlobReader::new()
        .with_file("/srv/definitions/my shop/tables/users.sql", "CREATE TABLE users");

    let plan = build_plan(&config, &roots, &blobs);

    assert!(matches!(
        plan[0].status,
        PlanStatus::Skipped {
            reason: SkipReason::UnknownObjectType { .. }
        }
    ));
    assert_eq!(plan[0].path, None);
    assert!(matches!(plan[1].status, PlanStatus::Unreadable { .. }));
    assert_eq!(
        plan[2].status,
        PlanStatus::InvalidDatabase {
            database: "my shop".to_string()
        }
    );
}

#[test]
fn test_plan_entry_json_shape() {
    let entry = PlanEntry {
        phase: Phase::Data,
        target: "shop/users".to_string(),
        description: "shop.users".to_string(),
        path: Some("/srv/initial-data/shop/users.sql".to_string()),
        status: PlanStatus::Ready,
    };

    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["phase"], "data");
    assert_eq!(value["status"], "ready");
    assert_eq!(value["path"], "/srv/initial-data/shop/users.sql");
}
