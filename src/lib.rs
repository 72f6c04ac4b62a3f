//! A Rust library for classifying diagnosis codes into ICD-11 chapters and
//! querying loaded diagnosis datasets by code range or prefix.

pub mod config;
pub mod error;
pub mod icd11;
pub mod ingest;
pub mod models;
pub mod query;
pub mod report;
pub mod session;
pub mod summary;
pub mod utils;

// Re-export the most common types for easier use
pub use config::ClassifierConfig;
pub use error::{ClassifierError, Result};
pub use icd11::{ChapterRange, CodeClassifier, UNKNOWN_CHAPTER, chapters, classify};
pub use models::{DiagnosisCollection, DiagnosisRecord};
pub use query::{CodeQuery, QueryEngine, prefix_search, range_search};
pub use session::Session;
pub use summary::{ChapterCount, ChapterSummary, aggregate};

// Ingestion
pub use ingest::{RowSource, TabularSource, load_file, load_files};
