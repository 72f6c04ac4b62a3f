//! Code-to-chapter resolution
//!
//! Each table entry is tested in declared order with two checks, and the first
//! entry that passes either check wins:
//!
//! 1. the normalized code lies inside the entry's inclusive range, or
//! 2. the normalized code starts with the entry's two-character family.
//!
//! The checks are interleaved per entry, so an earlier entry's family match
//! beats a later entry's range match. Codes matching nothing resolve to
//! [`UNKNOWN_CHAPTER`].

use super::chapters::{ChapterRange, ICD11_CHAPTERS, UNKNOWN_CHAPTER};
use serde::Serialize;

/// Normalize a raw code for comparison: trim surrounding whitespace and uppercase
#[must_use]
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// How a code was resolved to its chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The code lies inside the chapter's declared range
    Range,
    /// The code only shares the chapter's two-character family
    PrefixFallback,
    /// No chapter claimed the code
    Unmatched,
}

/// Result of resolving a single code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Resolved chapter label, or "Unknown"
    pub chapter: &'static str,
    /// Which rule produced the label
    pub kind: MatchKind,
}

impl Classification {
    const fn unmatched() -> Self {
        Self {
            chapter: UNKNOWN_CHAPTER,
            kind: MatchKind::Unmatched,
        }
    }

    /// Whether the code resolved to a real chapter
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.kind != MatchKind::Unmatched
    }
}

/// Resolves codes against an ordered chapter table
#[derive(Debug, Clone, Copy)]
pub struct CodeClassifier {
    table: &'static [ChapterRange],
}

impl Default for CodeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeClassifier {
    /// Create a classifier over the canonical ICD-11 table
    #[must_use]
    pub const fn new() -> Self {
        Self {
            table: &ICD11_CHAPTERS,
        }
    }

    /// Create a classifier over a custom table, evaluated in the given order
    #[must_use]
    pub const fn with_table(table: &'static [ChapterRange]) -> Self {
        Self { table }
    }

    /// Resolve a code to its chapter label
    ///
    /// The code is normalized internally; the caller need not trim or
    /// uppercase it. Never fails: unmatched codes yield "Unknown".
    #[must_use]
    pub fn classify(&self, code: &str) -> &'static str {
        self.resolve(code).chapter
    }

    /// Resolve a code and report which rule matched
    #[must_use]
    pub fn resolve(&self, code: &str) -> Classification {
        self.resolve_normalized(&normalize_code(code))
    }

    /// Resolve a code that is already trimmed and uppercased
    #[must_use]
    pub fn resolve_normalized(&self, normalized_code: &str) -> Classification {
        for chapter in self.table {
            if chapter.contains(normalized_code) {
                return Classification {
                    chapter: chapter.label,
                    kind: MatchKind::Range,
                };
            }
            if chapter.in_family(normalized_code) {
                return Classification {
                    chapter: chapter.label,
                    kind: MatchKind::PrefixFallback,
                };
            }
        }

        Classification::unmatched()
    }
}

/// Resolve a code against the canonical ICD-11 table
#[must_use]
pub fn classify(code: &str) -> &'static str {
    CodeClassifier::new().classify(code)
}
