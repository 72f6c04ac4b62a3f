//! Tests for code-to-chapter resolution

use icd11_classifier::icd11::{
    ChapterRange, CodeClassifier, MatchKind, UNKNOWN_CHAPTER, chapters, classify,
};

const INFECTIOUS: &str = "1. Certain infectious or parasitic diseases";
const NEOPLASMS: &str = "2. Neoplasms";

#[test]
fn test_range_bounds_are_inclusive() {
    assert_eq!(classify("1A00"), INFECTIOUS);
    assert_eq!(classify("1H0Z"), INFECTIOUS);
}

#[test]
fn test_every_start_and_end_resolves_to_its_chapter() {
    for chapter in chapters() {
        assert_eq!(classify(chapter.start), chapter.label);
        assert_eq!(classify(chapter.end), chapter.label);
    }
}

#[test]
fn test_unmatched_codes_are_unknown() {
    assert_eq!(classify(""), UNKNOWN_CHAPTER);
    assert_eq!(classify("ZZZZ"), UNKNOWN_CHAPTER);
    assert_eq!(classify("   "), UNKNOWN_CHAPTER);
    // Just past chapter 5 and outside its 5A family
    assert_eq!(classify("5D47"), UNKNOWN_CHAPTER);
}

#[test]
fn test_case_and_whitespace_insensitive() {
    assert_eq!(classify(" 2a20 "), classify("2A20"));
    assert_eq!(classify("\t2a20\n"), NEOPLASMS);
}

#[test]
fn test_family_fallback_claims_out_of_range_suffix() {
    let classifier = CodeClassifier::new();

    let result = classifier.resolve("HA9Z");
    assert_eq!(result.chapter, "17. Sexual health conditions");
    assert_eq!(result.kind, MatchKind::PrefixFallback);

    // Shorter than the start code but in the 1A family
    let result = classifier.resolve("1A");
    assert_eq!(result.chapter, INFECTIOUS);
    assert_eq!(result.kind, MatchKind::PrefixFallback);
}

#[test]
fn test_single_character_code_is_unknown() {
    assert_eq!(classify("2"), UNKNOWN_CHAPTER);
}

static OVERLAPPING: [ChapterRange; 2] = [
    ChapterRange::new("narrow", "QB00", "QB10"),
    ChapterRange::new("wide", "QA00", "QZ99"),
];

#[test]
fn test_family_check_runs_per_entry_in_table_order() {
    let classifier = CodeClassifier::with_table(&OVERLAPPING);

    // QB50 misses the narrow range but shares its QB family, which is
    // checked before the wide entry's range.
    let result = classifier.resolve("QB50");
    assert_eq!(result.chapter, "narrow");
    assert_eq!(result.kind, MatchKind::PrefixFallback);

    let result = classifier.resolve("QC00");
    assert_eq!(result.chapter, "wide");
    assert_eq!(result.kind, MatchKind::Range);
}

#[test]
fn test_custom_table_without_match_is_unknown() {
    let classifier = CodeClassifier::with_table(&OVERLAPPING);
    assert_eq!(classifier.classify("2A20"), UNKNOWN_CHAPTER);
}
