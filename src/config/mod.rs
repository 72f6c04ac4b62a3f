//! Configuration for loading and classifying diagnosis files.

use crate::error::{ClassifierError, Result};
use crate::error::util::safe_read_to_string;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of rows per Arrow batch when reading files
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Environment variable that overrides the batch size
pub const BATCH_SIZE_ENV: &str = "ICD11_BATCH_SIZE";

/// Helper function to get batch size from environment
#[must_use]
pub fn get_batch_size() -> Option<usize> {
    std::env::var(BATCH_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|size| *size > 0)
}

/// Configuration for the classifier and its file loaders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Column names holding diagnosis codes, checked in order
    pub code_fields: Vec<String>,
    /// Rows per batch when reading CSV and Parquet files
    pub batch_size: usize,
    /// Field delimiter for CSV files
    pub csv_delimiter: char,
    /// Whether CSV files start with a header row
    pub csv_has_header: bool,
    /// Show a progress bar while loading several files
    pub show_progress: bool,
    /// Rows shown when previewing a freshly loaded dataset
    pub preview_rows: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            code_fields: vec!["Diagnosis".to_string(), "code".to_string()],
            batch_size: DEFAULT_BATCH_SIZE,
            csv_delimiter: ',',
            csv_has_header: true,
            show_progress: true,
            preview_rows: 10,
        }
    }
}

impl ClassifierConfig {
    /// Load configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "reading classifier configuration")?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from the environment
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(batch_size) = get_batch_size() {
            self.batch_size = batch_size;
        }
        self
    }

    /// Check that the configuration can drive a load
    pub fn validate(&self) -> Result<()> {
        if self.code_fields.is_empty() {
            return Err(ClassifierError::Config(
                "at least one code field name is required".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(ClassifierError::Config(
                "batch_size must be greater than zero".to_string(),
            ));
        }
        self.delimiter_byte()?;
        Ok(())
    }

    /// The CSV delimiter as the single byte the reader splits on
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.csv_delimiter.is_ascii() {
            Ok(self.csv_delimiter as u8)
        } else {
            Err(ClassifierError::Config(format!(
                "csv_delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            )))
        }
    }
}
