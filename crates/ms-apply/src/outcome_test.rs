use super::*;

#[test]
fn test_classify_definition_clean_run_is_created() {
    assert_eq!(
        classify_definition(&ExecResult::new(0, 0)),
        ApplyOutcome::Created
    );
}

#[test]
fn test_classify_definition_warning_is_already_exists() {
    assert_eq!(
        classify_definition(&ExecResult::new(0, 1)),
        ApplyOutcome::AlreadyExists
    );
    assert_eq!(
        classify_definition(&ExecResult::new(0, 7)),
        ApplyOutcome::AlreadyExists
    );
}

#[test]
fn test_classify_definition_ignores_rows_affected() {
    // CREATE TABLE ... AS SELECT reports rows but is still a creation
    assert_eq!(
        classify_definition(&ExecResult::new(12, 0)),
        ApplyOutcome::Created
    );
}

#[test]
fn test_seed_row_counts_from_warnings() {
    let counts = seed_row_counts(&ExecResult::new(8, 2), SeedDuplicates::Warnings);
    assert_eq!(
        counts,
        RowCounts {
            inserted: 8,
            duplicates: 2
        }
    );
}

#[test]
fn test_seed_row_counts_ignoring_warnings() {
    let counts = seed_row_counts(&ExecResult::new(8, 2), SeedDuplicates::Ignore);
    assert_eq!(counts.inserted, 8);
    assert_eq!(counts.duplicates, 0);
}

#[test]
fn test_phase_report_tallies() {
    let mut report = PhaseReport::new(Phase::Schema);
    report.push(TargetReport::new("a/tables/x", "Table a.x", ApplyOutcome::Created));
    report.push(TargetReport::new(
        "a/tables/y",
        "Table a.y",
        ApplyOutcome::AlreadyExists,
    ));
    report.push(TargetReport::new(
        "a/views/z",
        "a/views/z",
        ApplyOutcome::Skipped(SkipReason::UnknownObjectType {
            category: "views".to_string(),
        }),
    ));
    report.push(TargetReport::new(
        "a/tables/w",
        "Table a.w",
        ApplyOutcome::Failed(FailureReason::Execute("syntax".to_string())),
    ));
    report.push(TargetReport::new("a/tables/v", "Table a.v", ApplyOutcome::Created));

    assert_eq!(report.created(), 2);
    assert_eq!(report.already_existing(), 1);
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.failed(), 1);
}

#[test]
fn test_skip_reason_display() {
    assert_eq!(
        SkipReason::TableNotEmpty { rows: 3 }.to_string(),
        "table is not empty (3 rows)"
    );
}
