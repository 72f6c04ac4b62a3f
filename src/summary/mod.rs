//! Chapter counts for a classified collection
//!
//! This module groups records by the chapter stored on them and orders the
//! groups the way a frequency table is read: largest first, with equal counts
//! kept in the order their chapter was first seen.

use crate::icd11::UNKNOWN_CHAPTER;
use crate::models::DiagnosisCollection;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::cmp::Reverse;
use std::fmt;

/// Number of records assigned to one chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChapterCount {
    /// Chapter label, or "Unknown"
    pub chapter: &'static str,
    /// Records carrying that label
    pub count: usize,
}

/// Count records per chapter, by descending count
///
/// Ties keep first-encountered order. Counts always sum to the collection
/// length.
#[must_use]
pub fn aggregate(collection: &DiagnosisCollection) -> Vec<ChapterCount> {
    let mut counts: Vec<ChapterCount> = Vec::new();
    let mut index: FxHashMap<&'static str, usize> = FxHashMap::default();

    for record in collection {
        match index.get(record.chapter) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(record.chapter, counts.len());
                counts.push(ChapterCount {
                    chapter: record.chapter,
                    count: 1,
                });
            }
        }
    }

    counts
        .into_iter()
        .sorted_by_key(|entry| Reverse(entry.count))
        .collect()
}

/// Chapter counts together with the collection total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterSummary {
    /// Number of records summarized
    pub total: usize,
    /// Per-chapter counts, largest first
    pub counts: Vec<ChapterCount>,
}

impl ChapterSummary {
    /// Summarize a collection
    #[must_use]
    pub fn from_collection(collection: &DiagnosisCollection) -> Self {
        Self {
            total: collection.len(),
            counts: aggregate(collection),
        }
    }

    /// Count for one chapter label, zero when absent
    #[must_use]
    pub fn count_for(&self, chapter: &str) -> usize {
        self.counts
            .iter()
            .find(|entry| entry.chapter == chapter)
            .map_or(0, |entry| entry.count)
    }

    /// Records that resolved to a real chapter
    #[must_use]
    pub fn classified(&self) -> usize {
        self.total - self.count_for(UNKNOWN_CHAPTER)
    }

    /// Share of the total held by a count, in percent
    #[must_use]
    pub fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total as f64
        }
    }
}

impl fmt::Display for ChapterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ICD-11 Chapter Summary:")?;
        writeln!(f, "  Total Diagnoses: {}", self.total)?;
        writeln!(f, "  Classified: {}", self.classified())?;
        writeln!(f, "  Unknown: {}", self.count_for(UNKNOWN_CHAPTER))?;
        writeln!(f, "  Chapters Present: {}", self.counts.len())?;
        Ok(())
    }
}
