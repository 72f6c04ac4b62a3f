//! ICD-11 chapter classification
//!
//! This module holds the static chapter table and the classifier that
//! resolves diagnosis codes against it.

pub mod chapters;
pub mod classifier;

pub use chapters::{ChapterRange, ICD11_CHAPTERS, UNKNOWN_CHAPTER, chapter_by_label, chapters};
pub use classifier::{Classification, CodeClassifier, MatchKind, classify, normalize_code};
