// ==========================================
// Engine integration tests
// ==========================================
// Target: resolver tri-state, classification lookup, alternative finder
// grouping and availability re-checking
// ==========================================

mod test_helpers;

use shortage_cds::domain::ShortageCheck;
use shortage_cds::engine::{AlternativeFinder, ClassificationLookup, ShortageResolver};
use shortage_cds::logging;
use shortage_cds::repository::{MedicationRegistryRepository, ShortageLedgerRepository};
use std::sync::Arc;
use test_helpers::{create_bare_db, create_test_db, seed_registry, seed_shortage};

fn build_resolver(db_path: &str) -> ShortageResolver {
    let ledger = Arc::new(ShortageLedgerRepository::new(db_path).unwrap());
    ShortageResolver::new(ledger)
}

fn build_finder(db_path: &str) -> AlternativeFinder {
    let registry = Arc::new(MedicationRegistryRepository::new(db_path).unwrap());
    let resolver = Arc::new(build_resolver(db_path));
    AlternativeFinder::new(registry, resolver)
}

// ==========================================
// Shortage resolver
// ==========================================

#[test]
fn test_absent_name_is_available() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db();

    let resolver = build_resolver(&db_path);
    assert_eq!(resolver.check("Pantoloc 40mg"), ShortageCheck::Available);
}

#[test]
fn test_any_ledger_entry_means_in_shortage() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db();
    // two historical entries for the same name, different statuses
    seed_shortage(&db_path, &["Mexalen 500mg", "Mexalen 500mg"]);

    let resolver = build_resolver(&db_path);
    assert_eq!(resolver.check("Mexalen 500mg"), ShortageCheck::InShortage);
}

#[test]
fn test_name_match_is_case_sensitive() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db();
    seed_shortage(&db_path, &["Mexalen 500mg"]);

    let resolver = build_resolver(&db_path);
    assert_eq!(resolver.check("mexalen 500mg"), ShortageCheck::Available);
}

#[test]
fn test_empty_name_is_available_not_unknown() {
    logging::init_test();
    // even over a broken store: an empty name is "nothing to check"
    let (_tmp, db_path) = create_bare_db();

    let resolver = build_resolver(&db_path);
    assert_eq!(resolver.check(""), ShortageCheck::Available);
}

#[test]
fn test_broken_store_yields_unknown() {
    logging::init_test();
    let (_tmp, db_path) = create_bare_db();

    let resolver = build_resolver(&db_path);
    assert_eq!(resolver.check("Mexalen 500mg"), ShortageCheck::Unknown);
}

// ==========================================
// Classification lookup
// ==========================================

#[test]
fn test_lookup_resolves_registry_entry() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db();
    seed_registry(
        &db_path,
        &[("Pantoloc 40mg", Some("A02BC02"), Some("1-23456"))],
    );

    let registry = Arc::new(MedicationRegistryRepository::new(&db_path).unwrap());
    let lookup = ClassificationLookup::new(registry);

    let record = lookup.resolve("Pantoloc 40mg").unwrap().unwrap();
    assert_eq!(record.atc_code.as_deref(), Some("A02BC02"));
    assert_eq!(record.registration_id.as_deref(), Some("1-23456"));

    assert!(lookup.resolve("Unlisted Med").unwrap().is_none());
    assert!(lookup.resolve("").unwrap().is_none());
}

#[test]
fn test_lookup_distinguishes_store_failure_from_absence() {
    logging::init_test();
    let (_tmp, db_path) = create_bare_db();

    let registry = Arc::new(MedicationRegistryRepository::new(&db_path).unwrap());
    let lookup = ClassificationLookup::new(registry);

    assert!(lookup.resolve("Pantoloc 40mg").is_err());
}

// ==========================================
// Alternative finder
// ==========================================

#[test]
fn test_short_code_yields_empty_sequence() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db();
    seed_registry(&db_path, &[("A", Some("N02BE01"), None)]);

    let finder = build_finder(&db_path);
    assert!(finder.find_alternatives("N", "A").unwrap().is_empty());
    assert!(finder.find_alternatives("", "A").unwrap().is_empty());
    assert!(finder.find_alternatives("N02BE01", "").unwrap().is_empty());
}

#[test]
fn test_group_scenario() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db();
    // A and B share group N02BE; C sits in a different group
    seed_registry(
        &db_path,
        &[
            ("A", Some("N02BE01"), Some("1-00001")),
            ("B", Some("N02BE51"), Some("1-00002")),
            ("C", Some("M01AB05"), Some("1-00003")),
        ],
    );
    seed_shortage(&db_path, &["A"]);

    let finder = build_finder(&db_path);
    let alternatives = finder.find_alternatives("N02BE01", "A").unwrap();

    let names: Vec<&str> = alternatives.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["B"]);
}

#[test]
fn test_sole_group_member_has_no_alternatives() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db();
    seed_registry(&db_path, &[("A", Some("N02BE01"), None)]);

    let resolver = build_resolver(&db_path);
    assert_eq!(resolver.check("A"), ShortageCheck::Available);

    let finder = build_finder(&db_path);
    assert!(finder.find_alternatives("N02BE01", "A").unwrap().is_empty());
}

#[test]
fn test_never_includes_excluded_name() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db();
    seed_registry(
        &db_path,
        &[
            ("A", Some("N02BE01"), None),
            ("B", Some("N02BE51"), None),
        ],
    );

    let finder = build_finder(&db_path);
    // A's own record matches the group prefix but must never appear
    let names: Vec<String> = finder
        .find_alternatives("N02BE01", "A")
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert!(!names.contains(&"A".to_string()));
    assert_eq!(names, ["B"]);
}

#[test]
fn test_never_includes_shortage_candidates() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db();
    seed_registry(
        &db_path,
        &[
            ("A", Some("N02BE01"), None),
            ("B", Some("N02BE51"), None),
            ("D", Some("N02BE05"), None),
        ],
    );
    seed_shortage(&db_path, &["A", "B"]);

    let finder = build_finder(&db_path);
    let names: Vec<String> = finder
        .find_alternatives("N02BE01", "A")
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, ["D"]);
}

#[test]
fn test_idempotent_over_unchanged_data() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db();
    seed_registry(
        &db_path,
        &[
            ("A", Some("N02BE01"), None),
            ("B", Some("N02BE51"), None),
            ("D", Some("N02BE05"), None),
            ("E", Some("N02BA01"), None),
        ],
    );
    seed_shortage(&db_path, &["A"]);

    let finder = build_finder(&db_path);
    let first = finder.find_alternatives("N02BE01", "A").unwrap();
    let second = finder.find_alternatives("N02BE01", "A").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_broken_store_fails_whole_operation() {
    logging::init_test();
    let (_tmp, db_path) = create_bare_db();

    let finder = build_finder(&db_path);
    // an unreachable registry is an error, never an empty list
    assert!(finder.find_alternatives("N02BE01", "A").is_err());
}

#[test]
fn test_unknown_candidates_are_skipped_not_fatal() {
    logging::init_test();
    // registry answers, but the ledger the re-check runs against is broken:
    // every candidate resolves to Unknown and is silently dropped
    let (_tmp_registry, registry_path) = create_test_db();
    let (_tmp_ledger, ledger_path) = create_bare_db();
    seed_registry(
        &registry_path,
        &[
            ("A", Some("N02BE01"), None),
            ("B", Some("N02BE51"), None),
        ],
    );

    let registry = Arc::new(MedicationRegistryRepository::new(&registry_path).unwrap());
    let resolver = Arc::new(build_resolver(&ledger_path));
    let finder = AlternativeFinder::new(registry, resolver);

    let alternatives = finder.find_alternatives("N02BE01", "A").unwrap();
    assert!(alternatives.is_empty());
}
