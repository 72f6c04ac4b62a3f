//! Diagnosis session
//!
//! A [`Session`] owns the collection most recently loaded by one caller,
//! along with the classifier used for it. Nothing is shared between sessions.
//! Loading either replaces the current collection or concatenates onto it.

use chrono::{DateTime, Local};

use crate::error::Result;
use crate::icd11::{CodeClassifier, MatchKind};
use crate::ingest::RowSource;
use crate::models::{DiagnosisCollection, DiagnosisRecord};
use crate::query::{CodeQuery, QueryEngine};
use crate::summary::{ChapterCount, ChapterSummary, aggregate};
use crate::utils::logging::log_source_warning;

/// One caller's loaded diagnoses
#[derive(Debug, Clone, Default)]
pub struct Session {
    classifier: CodeClassifier,
    collection: DiagnosisCollection,
    sources: Vec<String>,
    loaded_at: Option<DateTime<Local>>,
}

impl Session {
    /// Create an empty session using `classifier`
    #[must_use]
    pub fn new(classifier: CodeClassifier) -> Self {
        Self {
            classifier,
            ..Self::default()
        }
    }

    /// Replace the current collection with the rows of `sources`
    ///
    /// Rows are kept in source order, then row order. On error the previous
    /// collection is left untouched.
    pub fn load<S: RowSource>(&mut self, sources: &[S]) -> Result<usize> {
        let collection = self.collect(sources)?;
        self.collection = collection;
        self.sources = sources.iter().map(|s| s.source_name().to_string()).collect();
        self.loaded_at = Some(Local::now());

        log::info!("Loaded {} diagnoses", self.collection.len());
        Ok(self.collection.len())
    }

    /// Append the rows of `sources` after the current collection
    pub fn merge<S: RowSource>(&mut self, sources: &[S]) -> Result<usize> {
        let collection = self.collect(sources)?;
        let added = collection.len();
        self.collection.append(collection);
        self.sources
            .extend(sources.iter().map(|s| s.source_name().to_string()));
        self.loaded_at = Some(Local::now());

        log::info!(
            "Merged {added} diagnoses, session now holds {}",
            self.collection.len()
        );
        Ok(added)
    }

    fn collect<S: RowSource>(&self, sources: &[S]) -> Result<DiagnosisCollection> {
        let mut collection = DiagnosisCollection::new();
        for source in sources {
            let codes = source.codes()?;
            log::debug!(
                "Classifying {} codes from '{}' of {}",
                codes.len(),
                source.code_field(),
                source.source_name()
            );

            let mut fallbacks = 0usize;
            for code in codes {
                let (record, kind) = DiagnosisRecord::classified(code, &self.classifier);
                if kind == MatchKind::PrefixFallback {
                    fallbacks += 1;
                }
                collection.push(record);
            }

            if fallbacks > 0 {
                log_source_warning(
                    source.source_name(),
                    &format!("{fallbacks} codes matched a chapter only by family prefix"),
                );
            }
        }
        Ok(collection)
    }

    /// Recompute every chapter with the session's classifier
    pub fn reclassify(&mut self) {
        self.collection.reclassify(&self.classifier);
    }

    /// Swap the classifier and reclassify the loaded collection
    pub fn set_classifier(&mut self, classifier: CodeClassifier) {
        self.classifier = classifier;
        self.reclassify();
    }

    /// The classifier used by this session
    #[must_use]
    pub fn classifier(&self) -> &CodeClassifier {
        &self.classifier
    }

    /// The loaded collection
    #[must_use]
    pub fn collection(&self) -> &DiagnosisCollection {
        &self.collection
    }

    /// Whether nothing has been loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Names of the sources making up the collection, in load order
    #[must_use]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// When the collection last changed
    #[must_use]
    pub fn loaded_at(&self) -> Option<DateTime<Local>> {
        self.loaded_at
    }

    /// Chapter counts, largest first
    #[must_use]
    pub fn aggregate(&self) -> Vec<ChapterCount> {
        aggregate(&self.collection)
    }

    /// Chapter counts with totals
    #[must_use]
    pub fn summary(&self) -> ChapterSummary {
        ChapterSummary::from_collection(&self.collection)
    }

    /// Records with `start <= code <= end`
    #[must_use]
    pub fn range_search(&self, start: &str, end: &str) -> DiagnosisCollection {
        self.engine().range_search(&self.collection, start, end)
    }

    /// Records whose code starts with `prefix`, chapters recomputed
    #[must_use]
    pub fn prefix_search(&self, prefix: &str) -> DiagnosisCollection {
        self.engine().prefix_search(&self.collection, prefix)
    }

    /// Run a prepared query against the loaded collection
    #[must_use]
    pub fn run(&self, query: &CodeQuery) -> DiagnosisCollection {
        self.engine().run(&self.collection, query)
    }

    fn engine(&self) -> QueryEngine {
        QueryEngine::new(self.classifier)
    }
}
