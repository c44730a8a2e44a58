use std::fs;

use snapshot_updater::{
    assert_json_matches_file, DriverConfigurator, PatternMatcher, UpdaterConfig,
};
use tempfile::tempdir;

const FIXTURE: &str = "{\n  \"id\": \"@integer@\",\n  \"name\": \"old\"\n}";

fn configurator(enabled: bool) -> DriverConfigurator {
    let mut configurator = DriverConfigurator::new();
    configurator.create_drivers(&UpdaterConfig::default());
    if enabled {
        configurator.enable().unwrap();
    }
    configurator
}

#[test]
fn matching_content_passes_without_writing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("user.json");
    fs::write(&path, FIXTURE).unwrap();

    let result = assert_json_matches_file(
        &configurator(true),
        &PatternMatcher::new(),
        r#"{"id": 3, "name": "old"}"#,
        &path,
    );
    assert!(result.is_ok());
    assert_eq!(fs::read_to_string(&path).unwrap(), FIXTURE);
}

#[test]
fn mismatch_is_reported_and_fixture_updated() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("user.json");
    fs::write(&path, FIXTURE).unwrap();

    let failure = assert_json_matches_file(
        &configurator(true),
        &PatternMatcher::new(),
        r#"{"id": 3, "name": "new"}"#,
        &path,
    )
    .unwrap_err();

    assert!(failure.comparison().is_some());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{\n  \"id\": \"@integer@\",\n  \"name\": \"new\"\n}"
    );

    // The rewritten fixture now passes.
    assert!(assert_json_matches_file(
        &configurator(false),
        &PatternMatcher::new(),
        r#"{"id": 3, "name": "new"}"#,
        &path,
    )
    .is_ok());
}

#[test]
fn disabled_configurator_leaves_fixture_alone() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("user.json");
    fs::write(&path, FIXTURE).unwrap();

    let result = assert_json_matches_file(
        &configurator(false),
        &PatternMatcher::new(),
        r#"{"id": 3, "name": "new"}"#,
        &path,
    );
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), FIXTURE);
}

#[test]
fn failed_update_still_reports_original_failure() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scalar.json");
    fs::write(&path, "\"expected\"").unwrap();

    // A scalar actual cannot become a JSON snapshot; the update is skipped.
    let failure = assert_json_matches_file(
        &configurator(true),
        &PatternMatcher::new(),
        "\"actual\"",
        &path,
    )
    .unwrap_err();
    assert!(failure.comparison().is_some());
    assert_eq!(fs::read_to_string(&path).unwrap(), "\"expected\"");
}
