// ==========================================
// CheckApi / MedicationApi integration tests
// ==========================================
// Target: check-and-notify orchestration with a stubbed hook dispatcher,
// typeahead suggestion rules
// ==========================================

mod test_helpers;

use shortage_cds::api::{ApiError, CheckApi, MedicationApi};
use shortage_cds::domain::ShortageCheck;
use shortage_cds::engine::{AlternativeFinder, ClassificationLookup, ShortageResolver};
use shortage_cds::hooks::ATC_CODING_SYSTEM;
use shortage_cds::logging;
use shortage_cds::repository::{MedicationRegistryRepository, ShortageLedgerRepository};
use std::sync::Arc;
use test_helpers::{create_bare_db, create_test_db, seed_registry, seed_shortage, StubDispatcher};

fn build_check_api(db_path: &str, dispatcher: Arc<StubDispatcher>) -> CheckApi {
    let ledger = Arc::new(ShortageLedgerRepository::new(db_path).unwrap());
    let registry = Arc::new(MedicationRegistryRepository::new(db_path).unwrap());
    let resolver = Arc::new(ShortageResolver::new(ledger));
    let lookup = Arc::new(ClassificationLookup::new(registry.clone()));
    let finder = Arc::new(AlternativeFinder::new(registry, resolver.clone()));
    CheckApi::new(resolver, lookup, finder, dispatcher)
}

#[tokio::test]
async fn test_check_in_shortage_with_alternatives() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db();
    seed_registry(
        &db_path,
        &[
            ("A", Some("N02BE01"), Some("1-00001")),
            ("B", Some("N02BE51"), Some("1-00002")),
            ("C", Some("M01AB05"), Some("1-00003")),
        ],
    );
    seed_shortage(&db_path, &["A"]);

    let dispatcher = Arc::new(StubDispatcher::new());
    let api = build_check_api(&db_path, dispatcher.clone());

    let report = api.check_and_notify("A").await.expect("check should succeed");

    assert_eq!(report.medication_checked, "A");
    assert_eq!(report.local_check.status, ShortageCheck::InShortage);
    assert_eq!(report.local_check.atc_code_found.as_deref(), Some("N02BE01"));
    assert_eq!(report.local_check.alternatives_found_count, 1);
    assert_eq!(report.local_check.alternatives_details[0].name, "B");
    assert_eq!(report.external_cds_hook_call.status_code, Some(200));

    // the dispatched payload carries the coded reference
    let sent = dispatcher.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let resource = &sent[0].context.draft_orders.entry[0].resource;
    let coding = resource.medication_codeable_concept.coding.as_ref().unwrap();
    assert_eq!(coding[0].system, ATC_CODING_SYSTEM);
    assert_eq!(coding[0].code, "N02BE01");
}

#[tokio::test]
async fn test_check_available_medication_still_notifies() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db();
    seed_registry(&db_path, &[("A", Some("N02BE01"), None)]);

    let dispatcher = Arc::new(StubDispatcher::new());
    let api = build_check_api(&db_path, dispatcher.clone());

    let report = api.check_and_notify("A").await.expect("check should succeed");

    assert_eq!(report.local_check.status, ShortageCheck::Available);
    assert_eq!(report.local_check.alternatives_found_count, 0);
    assert!(report.local_check.alternatives_details.is_empty());
    assert_eq!(dispatcher.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_check_unregistered_medication_has_no_coding() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db();
    seed_shortage(&db_path, &["Unlisted Med"]);

    let dispatcher = Arc::new(StubDispatcher::new());
    let api = build_check_api(&db_path, dispatcher.clone());

    let report = api
        .check_and_notify("Unlisted Med")
        .await
        .expect("check should succeed");

    // in shortage, but no ATC code known: no alternatives, uncoded payload
    assert_eq!(report.local_check.status, ShortageCheck::InShortage);
    assert_eq!(report.local_check.atc_code_found, None);
    assert_eq!(report.local_check.alternatives_found_count, 0);

    let sent = dispatcher.sent.lock().unwrap();
    let resource = &sent[0].context.draft_orders.entry[0].resource;
    assert!(resource.medication_codeable_concept.coding.is_none());
    assert_eq!(resource.medication_codeable_concept.text, "Unlisted Med");
}

#[tokio::test]
async fn test_check_broken_store_is_distinct_error() {
    logging::init_test();
    let (_tmp, db_path) = create_bare_db();

    let dispatcher = Arc::new(StubDispatcher::new());
    let api = build_check_api(&db_path, dispatcher.clone());

    let result = api.check_and_notify("A").await;
    assert!(matches!(result, Err(ApiError::StoreUnavailable(_))));
    // nothing was relayed on an unknown local result
    assert!(dispatcher.sent.lock().unwrap().is_empty());
}

// ==========================================
// Typeahead
// ==========================================

#[test]
fn test_suggest_rules() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db();
    seed_registry(
        &db_path,
        &[
            ("Pantoloc 20mg", Some("A02BC02"), None),
            ("Pantoloc 40mg", Some("A02BC02"), None),
            ("pantoloc generika", Some("A02BC02"), None),
            ("Mexalen 500mg", Some("N02BE01"), None),
        ],
    );

    let registry = Arc::new(MedicationRegistryRepository::new(&db_path).unwrap());
    let api = MedicationApi::new(registry);

    // prefix match is case-sensitive
    let hits = api.suggest("Panto").unwrap();
    assert_eq!(hits, ["Pantoloc 20mg", "Pantoloc 40mg"]);

    // short or empty terms answer with nothing
    assert!(api.suggest("P").unwrap().is_empty());
    assert!(api.suggest("").unwrap().is_empty());
}

#[test]
fn test_suggest_is_capped() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db();

    let entries: Vec<String> = (0..20).map(|i| format!("Medikament {:02}", i)).collect();
    let seeded: Vec<(&str, Option<&str>, Option<&str>)> =
        entries.iter().map(|n| (n.as_str(), None, None)).collect();
    seed_registry(&db_path, &seeded);

    let registry = Arc::new(MedicationRegistryRepository::new(&db_path).unwrap());
    let api = MedicationApi::new(registry);

    assert_eq!(api.suggest("Medikament").unwrap().len(), 15);
}
