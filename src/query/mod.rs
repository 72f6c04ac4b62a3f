//! Range and prefix search over diagnosis collections
//!
//! Both searches compare against each record's normalized code and return a
//! new collection that keeps the original relative order. Neither search
//! mutates its input.

use crate::error::{ClassifierError, Result};
use crate::icd11::CodeClassifier;
use crate::models::{DiagnosisCollection, DiagnosisRecord};
use std::fmt;

/// A code filter that can be built once and run against any collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeQuery {
    /// Codes inside `start..=end`, compared lexicographically
    Range { start: String, end: String },
    /// Codes starting with the given prefix
    Prefix(String),
}

impl CodeQuery {
    /// Build a range query; bounds are uppercased but not trimmed
    #[must_use]
    pub fn range(start: &str, end: &str) -> Self {
        Self::Range {
            start: start.to_uppercase(),
            end: end.to_uppercase(),
        }
    }

    /// Build a range query from user input, rejecting blank bounds
    pub fn checked_range(start: &str, end: &str) -> Result<Self> {
        if start.trim().is_empty() || end.trim().is_empty() {
            return Err(ClassifierError::InvalidQuery(
                "both start and end codes are required".to_string(),
            ));
        }
        Ok(Self::range(start, end))
    }

    /// Build a prefix query; the prefix is uppercased but not trimmed
    #[must_use]
    pub fn prefix(prefix: &str) -> Self {
        Self::Prefix(prefix.to_uppercase())
    }

    /// Check whether a record satisfies the query
    #[must_use]
    pub fn matches(&self, record: &DiagnosisRecord) -> bool {
        match self {
            Self::Range { start, end } => record.in_range(start, end),
            Self::Prefix(prefix) => record.has_prefix(prefix),
        }
    }

    /// A range whose start sorts after its end can never match
    #[must_use]
    pub fn is_empty_range(&self) -> bool {
        matches!(self, Self::Range { start, end } if start > end)
    }
}

impl fmt::Display for CodeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range { start, end } => write!(f, "range {start}..={end}"),
            Self::Prefix(prefix) => write!(f, "prefix '{prefix}'"),
        }
    }
}

/// Answers range and prefix queries, classifying prefix hits at query time
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryEngine {
    classifier: CodeClassifier,
}

impl QueryEngine {
    /// Create an engine that recomputes chapters with `classifier`
    #[must_use]
    pub const fn new(classifier: CodeClassifier) -> Self {
        Self { classifier }
    }

    /// All records with `start <= code <= end`
    ///
    /// This is a direct string-range filter: a record can be in range even
    /// when its chapter is "Unknown". A start that sorts after the end yields
    /// an empty result.
    #[must_use]
    pub fn range_search(
        &self,
        collection: &DiagnosisCollection,
        start: &str,
        end: &str,
    ) -> DiagnosisCollection {
        self.run(collection, &CodeQuery::range(start, end))
    }

    /// All records whose code starts with `prefix`, with chapters recomputed
    ///
    /// An empty prefix matches every record.
    #[must_use]
    pub fn prefix_search(
        &self,
        collection: &DiagnosisCollection,
        prefix: &str,
    ) -> DiagnosisCollection {
        self.run(collection, &CodeQuery::prefix(prefix))
    }

    /// Run a prepared query
    #[must_use]
    pub fn run(&self, collection: &DiagnosisCollection, query: &CodeQuery) -> DiagnosisCollection {
        if query.is_empty_range() {
            log::debug!("Empty {query}: start sorts after end");
            return DiagnosisCollection::new();
        }

        let mut hits = collection.filter(|record| query.matches(record));
        if let CodeQuery::Prefix(_) = query {
            hits.reclassify(&self.classifier);
        }

        log::debug!("{query} matched {} of {} records", hits.len(), collection.len());
        hits
    }
}

/// Range search against the canonical ICD-11 table
#[must_use]
pub fn range_search(collection: &DiagnosisCollection, start: &str, end: &str) -> DiagnosisCollection {
    QueryEngine::default().range_search(collection, start, end)
}

/// Prefix search against the canonical ICD-11 table
#[must_use]
pub fn prefix_search(collection: &DiagnosisCollection, prefix: &str) -> DiagnosisCollection {
    QueryEngine::default().prefix_search(collection, prefix)
}
