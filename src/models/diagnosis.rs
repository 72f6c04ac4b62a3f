//! Diagnosis record model
//!
//! This module contains the diagnosis record and the ordered collection that
//! a session classifies, summarizes and queries. Chapters are derived values:
//! they are assigned by a [`CodeClassifier`] and overwritten on every
//! reclassification pass.

use crate::error::Result;
use crate::icd11::{CodeClassifier, MatchKind, normalize_code};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use std::sync::Arc;

/// A single diagnosis code with its resolved chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosisRecord {
    /// Code exactly as it arrived from the source
    pub raw_code: String,
    /// Trimmed, uppercased code used for every comparison
    pub normalized_code: String,
    /// Chapter label assigned by the last classification pass
    pub chapter: &'static str,
}

impl DiagnosisRecord {
    /// Create a record and classify it
    #[must_use]
    pub fn new(raw_code: impl Into<String>, classifier: &CodeClassifier) -> Self {
        Self::classified(raw_code, classifier).0
    }

    /// Create a record and report which rule assigned its chapter
    #[must_use]
    pub fn classified(
        raw_code: impl Into<String>,
        classifier: &CodeClassifier,
    ) -> (Self, MatchKind) {
        let raw_code = raw_code.into();
        let normalized_code = normalize_code(&raw_code);
        let classification = classifier.resolve_normalized(&normalized_code);
        let record = Self {
            raw_code,
            normalized_code,
            chapter: classification.chapter,
        };
        (record, classification.kind)
    }

    /// Recompute the chapter, overwriting the previous value
    pub fn reclassify(&mut self, classifier: &CodeClassifier) {
        self.chapter = classifier.resolve_normalized(&self.normalized_code).chapter;
    }

    /// Check if the normalized code lies inside `start..=end`
    ///
    /// Bounds are compared as given; callers uppercase them first.
    #[must_use]
    pub fn in_range(&self, start: &str, end: &str) -> bool {
        start <= self.normalized_code.as_str() && self.normalized_code.as_str() <= end
    }

    /// Check if the normalized code starts with `prefix`
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.normalized_code.starts_with(prefix)
    }
}

/// An ordered collection of diagnosis records
///
/// Insertion order is preserved and duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DiagnosisCollection {
    records: Vec<DiagnosisRecord>,
}

impl DiagnosisCollection {
    /// Create a new empty `DiagnosisCollection`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from raw codes, classifying each one
    #[must_use]
    pub fn from_codes<I, S>(codes: I, classifier: &CodeClassifier) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        codes
            .into_iter()
            .map(|code| DiagnosisRecord::new(code, classifier))
            .collect()
    }

    /// Add a record to the end of the collection
    pub fn push(&mut self, record: DiagnosisRecord) {
        self.records.push(record);
    }

    /// Append all records of another collection, keeping both orders
    pub fn append(&mut self, other: Self) {
        self.records.extend(other.records);
    }

    /// Recompute every record's chapter
    pub fn reclassify(&mut self, classifier: &CodeClassifier) {
        for record in &mut self.records {
            record.reclassify(classifier);
        }
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection has no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the records in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, DiagnosisRecord> {
        self.records.iter()
    }

    /// Borrow the records as a slice
    #[must_use]
    pub fn records(&self) -> &[DiagnosisRecord] {
        &self.records
    }

    /// Copy the records matching a predicate into a new collection
    #[must_use]
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&DiagnosisRecord) -> bool,
    {
        self.records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// Get the Arrow schema used when exporting records
    #[must_use]
    pub fn schema() -> Schema {
        Schema::new(vec![
            Field::new("raw_code", DataType::Utf8, false),
            Field::new("normalized_code", DataType::Utf8, false),
            Field::new("chapter", DataType::Utf8, false),
        ])
    }

    /// Convert the collection to a `RecordBatch`
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let raw: ArrayRef = Arc::new(StringArray::from_iter_values(
            self.records.iter().map(|r| r.raw_code.as_str()),
        ));
        let normalized: ArrayRef = Arc::new(StringArray::from_iter_values(
            self.records.iter().map(|r| r.normalized_code.as_str()),
        ));
        let chapter: ArrayRef = Arc::new(StringArray::from_iter_values(
            self.records.iter().map(|r| r.chapter),
        ));

        let batch = RecordBatch::try_new(
            Arc::new(Self::schema()),
            vec![raw, normalized, chapter],
        )?;
        Ok(batch)
    }
}

impl FromIterator<DiagnosisRecord> for DiagnosisCollection {
    fn from_iter<T: IntoIterator<Item = DiagnosisRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DiagnosisCollection {
    type Item = DiagnosisRecord;
    type IntoIter = std::vec::IntoIter<DiagnosisRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosisCollection {
    type Item = &'a DiagnosisRecord;
    type IntoIter = std::slice::Iter<'a, DiagnosisRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
