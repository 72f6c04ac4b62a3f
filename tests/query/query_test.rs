//! Tests for range and prefix search

use icd11_classifier::icd11::{ChapterRange, CodeClassifier, UNKNOWN_CHAPTER};
use icd11_classifier::models::DiagnosisCollection;
use icd11_classifier::query::{CodeQuery, QueryEngine, prefix_search, range_search};

fn sample() -> DiagnosisCollection {
    DiagnosisCollection::from_codes(
        ["2A20", "1A00", "zzzz", "2a21", "2B10", "2F9Z", "3A00", " 2a22 "],
        &CodeClassifier::new(),
    )
}

fn codes(collection: &DiagnosisCollection) -> Vec<&str> {
    collection.iter().map(|r| r.normalized_code.as_str()).collect()
}

#[test]
fn test_range_search_preserves_order() {
    let hits = range_search(&sample(), "2A00", "2F9Z");
    assert_eq!(codes(&hits), vec!["2A20", "2A21", "2B10", "2F9Z", "2A22"]);
}

#[test]
fn test_range_search_is_idempotent() {
    let collection = sample();
    let first = range_search(&collection, "1A00", "2B10");
    let second = range_search(&collection, "1A00", "2B10");
    assert_eq!(first, second);
}

#[test]
fn test_range_search_bounds_are_case_insensitive() {
    let upper = range_search(&sample(), "2A00", "2F9Z");
    let lower = range_search(&sample(), "2a00", "2f9z");
    assert_eq!(upper, lower);
}

#[test]
fn test_inverted_range_is_empty() {
    assert!(range_search(&sample(), "2F00", "2A00").is_empty());
}

#[test]
fn test_range_search_ignores_chapters() {
    // ZZZZ is Unknown but still sorts inside this range
    let hits = range_search(&sample(), "Z", "ZZZZZ");
    assert_eq!(codes(&hits), vec!["ZZZZ"]);
    assert_eq!(hits.records()[0].chapter, UNKNOWN_CHAPTER);
}

#[test]
fn test_empty_start_is_taken_literally() {
    let hits = range_search(&sample(), "", "ZZZZ");
    assert_eq!(hits.len(), sample().len());
}

#[test]
fn test_range_search_does_not_mutate_input() {
    let collection = sample();
    let before = collection.clone();
    let _ = range_search(&collection, "2A00", "2F9Z");
    let _ = prefix_search(&collection, "2A");
    assert_eq!(collection, before);
}

#[test]
fn test_prefix_search_returns_neoplasms() {
    let hits = prefix_search(&sample(), "2a");
    assert_eq!(codes(&hits), vec!["2A20", "2A21", "2A22"]);
    assert!(hits.iter().all(|r| r.chapter == "2. Neoplasms"));
}

#[test]
fn test_prefix_search_without_match() {
    assert!(prefix_search(&sample(), "X").is_empty());
}

static RELABELLED: [ChapterRange; 1] = [ChapterRange::new("relabelled", "2A00", "2A99")];

#[test]
fn test_prefix_search_recomputes_stale_chapters() {
    // Records were classified with the canonical table
    let collection = sample();
    let engine = QueryEngine::new(CodeClassifier::with_table(&RELABELLED));

    let hits = engine.prefix_search(&collection, "2A2");
    assert_eq!(hits.len(), 3);
    assert!(hits.iter().all(|r| r.chapter == "relabelled"));

    // Range search reports chapters as stored
    let hits = engine.range_search(&collection, "2A20", "2A20");
    assert_eq!(hits.records()[0].chapter, "2. Neoplasms");
}

#[test]
fn test_prepared_query_runs_against_any_collection() {
    let engine = QueryEngine::default();
    let query = CodeQuery::prefix("1a");

    assert_eq!(engine.run(&sample(), &query).len(), 1);
    assert_eq!(engine.run(&DiagnosisCollection::new(), &query).len(), 0);
    assert_eq!(query.to_string(), "prefix '1A'");
}
