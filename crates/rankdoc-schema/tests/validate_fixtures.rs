//! Integration test: validate every fixture document under `tests/fixtures/`.
//!
//! Documents under `valid/` must pass the validator (with and without the
//! opt-in checks) and the published contract. Documents under `invalid/`
//! must fail with the exact errors listed in `EXPECTED_ERRORS`.

use rankdoc_schema::{validate_query, QueryContract, ValidationOptions, Validator};
use serde_json::Value;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn find_fixtures(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|e| e.path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
                .collect()
        })
        .unwrap_or_default();
    files.sort();
    files
}

fn load(path: &Path) -> Value {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()))
}

const EXPECTED_ERRORS: &[(&str, &[&str])] = &[
    (
        "assign-value-string.json",
        &["Rule[0].assignMethod[0].value must be a number"],
    ),
    (
        "null-containers.json",
        &[
            "rules must be an array",
            "Selection must be an array",
            "scoreMethod must be an array",
        ],
    ),
    (
        "selection-sort-order.json",
        &["Selection[0].quantity.sortOrder must be either 'Ascending' or 'Descending'"],
    ),
];

#[test]
fn test_discover_fixtures() {
    assert!(find_fixtures(&fixtures_dir().join("valid")).len() >= 3);
    assert_eq!(
        find_fixtures(&fixtures_dir().join("invalid")).len(),
        EXPECTED_ERRORS.len()
    );
}

#[test]
fn test_valid_fixtures_pass_validator() {
    let strict = Validator::with_options(ValidationOptions {
        strict_condition_values: true,
        require_default_option: true,
        exclusive_rule_body: true,
    });
    for path in find_fixtures(&fixtures_dir().join("valid")) {
        let doc = load(&path);
        let report = validate_query(&doc);
        assert!(report.is_valid(), "{}:\n{report}", path.display());
        let report = strict.validate(&doc);
        assert!(report.is_valid(), "{} (strict):\n{report}", path.display());
    }
}

#[test]
fn test_valid_fixtures_satisfy_contract() {
    let contract = QueryContract::load().expect("bundled contract compiles");
    for path in find_fixtures(&fixtures_dir().join("valid")) {
        let violations = contract.check(&load(&path));
        assert!(
            violations.is_empty(),
            "{}: {:?}",
            path.display(),
            violations.iter().map(ToString::to_string).collect::<Vec<_>>()
        );
    }
}

#[test]
fn test_valid_fixtures_decode_as_documents() {
    for path in find_fixtures(&fixtures_dir().join("valid")) {
        let value = load(&path);
        let doc = rankdoc_core::Document::from_value(&value)
            .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        assert!(rankdoc_schema::validate_document(&doc).is_valid());
    }
}

#[test]
fn test_invalid_fixtures_report_expected_errors() {
    for (name, expected) in EXPECTED_ERRORS {
        let doc = load(&fixtures_dir().join("invalid").join(name));
        let report = validate_query(&doc);
        assert!(!report.is_valid(), "{name} unexpectedly valid");
        assert_eq!(report.errors(), *expected, "{name}");
    }
}

#[test]
fn test_invalid_fixtures_also_fail_contract() {
    let contract = QueryContract::load().expect("bundled contract compiles");
    for (name, _) in EXPECTED_ERRORS {
        let doc = load(&fixtures_dir().join("invalid").join(name));
        assert!(!contract.is_valid(&doc), "{name} satisfied the contract");
    }
}
