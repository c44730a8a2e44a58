//! End-to-end checks of placeholder patterns through the public API.

use serde_json::{json, Value};
use snapshot_matcher::{Matcher, Pattern, PatternError, PatternMatcher, TypeKind};

fn check(value: Value, pattern: &str, expected: bool) {
    let matcher = PatternMatcher::new();
    assert_eq!(
        matcher.matches(&value, pattern),
        expected,
        "value: {}, pattern: {}",
        value,
        pattern
    );
}

#[test]
fn test_string_expanders() {
    check(json!("ord_123"), "@string@.startsWith('ord_')", true);
    check(json!("ord_123"), "@string@.startsWith('ORD_', true)", true);
    check(json!("ord_123"), "@string@.endsWith('123')", true);
    check(json!("ord_123"), "@string@.contains('d_1').notContains('x')", true);
    check(json!("ord_123"), "@string@.contains('x')", false);
    check(json!("ord_123"), "@string@.matchRegex('/^ord_\\d+$/')", true);
    check(json!(""), "@string@.isEmpty()", true);
    check(json!("x"), "@string@.isNotEmpty()", true);
}

#[test]
fn test_format_expanders() {
    check(json!("2024-01-01T00:00:00Z"), "@string@.isDateTime()", true);
    check(json!("not a date"), "@string@.isDateTime()", false);
    check(json!("dev@example.org"), "@string@.isEmail()", true);
    check(json!("https://example.org/x"), "@string@.isUrl()", true);
    check(json!("10.0.0.1"), "@string@.isIp()", true);
}

#[test]
fn test_numeric_expanders() {
    check(json!(5), "@integer@.greaterThan(0).lowerThan(10)", true);
    check(json!(15), "@integer@.greaterThan(0).lowerThan(10)", false);
    check(json!(2.5), "@double@.lowerThan(3)", true);
    check(json!("12.5"), "@number@.greaterThan(12)", true);
}

#[test]
fn test_collection_expanders() {
    check(json!(["a", "b"]), "@array@.count(2)", true);
    check(json!(["a", "b"]), "@array@.inArray('b')", true);
    check(json!({"id": 1}), "@array@.hasProperty('id')", true);
    check(json!({"id": 1}), "@array@.hasProperty('name')", false);
}

#[test]
fn test_type_mismatch_short_circuits_expanders() {
    check(json!(42), "@string@.isEmpty()", false);
    check(json!("42"), "@integer@", false);
}

#[test]
fn test_pattern_parse_api() {
    let pattern = Pattern::parse("@uuid@.optional()").unwrap();
    assert_eq!(pattern.kind, TypeKind::Uuid);
    assert!(pattern.is_optional());

    assert_eq!(
        Pattern::parse("@uuid@.nope()").unwrap_err(),
        PatternError::UnknownExpander("nope".to_string())
    );
}

#[test]
fn test_documents_with_placeholders() {
    let matcher = PatternMatcher::new();
    let expected = json!({
        "id": "@uuid@",
        "createdAt": "@string@.isDateTime()",
        "owner": {"name": "@string@", "email": "@string@.isEmail()"},
        "tags": ["first", "@...@"],
        "deletedAt": "@null@"
    });
    let actual = json!({
        "id": "8f4b0d2e-6c1a-4b7e-9a3f-2d5c8e1b7a90",
        "createdAt": "2024-05-01T12:00:00+00:00",
        "owner": {"name": "Sam", "email": "sam@example.org"},
        "tags": ["first", "second", "third"],
        "deletedAt": null
    });
    assert!(matcher.match_values(&actual, &expected));

    let mut changed = actual.clone();
    changed["owner"]["email"] = json!("nope");
    assert!(!matcher.match_values(&changed, &expected));
}
