//! ICD-11 chapter ranges
//!
//! This module defines the static chapter table used to resolve diagnosis
//! codes into their top-level ICD-11 chapter. The table is declared in a fixed
//! order, and that order is the precedence used when more than one entry
//! could match a code.

use serde::Serialize;
use std::fmt;

/// Label assigned to codes that no chapter range claims
pub const UNKNOWN_CHAPTER: &str = "Unknown";

/// One chapter of the classification table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChapterRange {
    /// Display label, e.g. "2. Neoplasms"
    pub label: &'static str,
    /// First code of the chapter (inclusive)
    pub start: &'static str,
    /// Last code of the chapter (inclusive)
    pub end: &'static str,
}

impl ChapterRange {
    /// Create a chapter range
    #[must_use]
    pub const fn new(label: &'static str, start: &'static str, end: &'static str) -> Self {
        Self { label, start, end }
    }

    /// Check whether an already normalized code lies inside `start..=end`
    #[must_use]
    pub fn contains(&self, normalized_code: &str) -> bool {
        self.start <= normalized_code && normalized_code <= self.end
    }

    /// The first two characters of the start code
    ///
    /// Codes sharing this prefix are claimed by the chapter even when their
    /// suffix falls outside the declared bounds.
    #[must_use]
    pub fn family(&self) -> &'static str {
        match self.start.char_indices().nth(2) {
            Some((idx, _)) => &self.start[..idx],
            None => self.start,
        }
    }

    /// Check whether a normalized code belongs to this chapter's prefix family
    #[must_use]
    pub fn in_family(&self, normalized_code: &str) -> bool {
        normalized_code.starts_with(self.family())
    }
}

impl fmt::Display for ChapterRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}-{})", self.label, self.start, self.end)
    }
}

/// The canonical ICD-11 chapter table
pub static ICD11_CHAPTERS: [ChapterRange; 22] = [
    ChapterRange::new("1. Certain infectious or parasitic diseases", "1A00", "1H0Z"),
    ChapterRange::new("2. Neoplasms", "2A00", "2F9Z"),
    ChapterRange::new("3. Diseases of the blood or blood-forming organs", "3A00", "3C0Z"),
    ChapterRange::new("4. Diseases of the immune system", "4A00", "4B4Z"),
    ChapterRange::new("5. Endocrine, nutritional and metabolic diseases", "5A00", "5D46"),
    ChapterRange::new(
        "6. Mental, behavioural and neurodevelopmental disorders",
        "6A00",
        "6E8Z",
    ),
    ChapterRange::new("7. Sleep-wake disorders", "7A00", "7B2Z"),
    ChapterRange::new("8. Diseases of the nervous system", "8A00", "8E7Z"),
    ChapterRange::new("9. Diseases of the visual system", "9A00", "9E1Z"),
    ChapterRange::new("10. Diseases of the ear or mastoid process", "AA00", "AC0Z"),
    ChapterRange::new("11. Diseases of the circulatory system", "BA00", "BE2Z"),
    ChapterRange::new("12. Diseases of the respiratory system", "CA00", "CB7Z"),
    ChapterRange::new("13. Diseases of the digestive system", "DA00", "DE2Z"),
    ChapterRange::new("14. Diseases of the skin or subcutaneous tissue", "EA00", "EM0Z"),
    ChapterRange::new("15. Diseases of musculoskeletal system", "FA00", "FC0Z"),
    ChapterRange::new("16. Diseases of the genitourinary system", "GA00", "GC8Z"),
    ChapterRange::new("17. Sexual health conditions", "HA00", "HA8Z"),
    ChapterRange::new("18. Pregnancy/childbirth", "JA00", "JB6Z"),
    ChapterRange::new("19. Perinatal conditions", "KA00", "KD5Z"),
    ChapterRange::new("20. Developmental anomalies", "LA00", "LD9Z"),
    ChapterRange::new("21. Symptoms/clinical findings NEC", "MA00", "MH2Y"),
    ChapterRange::new("22. Injury/poisoning/external causes", "NA00", "NF2Z"),
];

/// Get the ordered ICD-11 chapter table
#[must_use]
pub fn chapters() -> &'static [ChapterRange] {
    &ICD11_CHAPTERS
}

/// Look up a chapter of the canonical table by its label
#[must_use]
pub fn chapter_by_label(label: &str) -> Option<&'static ChapterRange> {
    ICD11_CHAPTERS.iter().find(|chapter| chapter.label == label)
}
