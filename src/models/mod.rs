//! Domain models
//!
//! This module contains the diagnosis record and collection types that flow
//! between ingestion, classification, querying and reporting.

pub mod diagnosis;

pub use diagnosis::{DiagnosisCollection, DiagnosisRecord};
