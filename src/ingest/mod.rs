//! Diagnosis file ingestion
//!
//! Uploaded files are read into Arrow record batches, one [`TabularSource`]
//! per file. Each source detects which of the configured column names holds
//! its diagnosis codes and exposes them through the [`RowSource`] capability,
//! so nothing downstream deals with column names.

pub mod csv_reader;
pub mod excel_reader;
pub mod parquet_reader;
pub mod text_reader;

use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, SchemaRef};
use arrow::record_batch::RecordBatch;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::ClassifierConfig;
use crate::error::util::file_extension;
use crate::error::{ClassifierError, Result};
use crate::utils::logging::{
    create_main_progress_bar, finish_progress_bar, log_read_complete, log_read_start,
    log_source_warning,
};

/// Column name given to codes read from plain-text files
pub const TEXT_CODE_FIELD: &str = "Diagnosis";

/// A source of diagnosis rows with a resolved code column
pub trait RowSource {
    /// Name of the column holding diagnosis codes
    fn code_field(&self) -> &str;

    /// The raw codes, in row order
    fn codes(&self) -> Result<Vec<String>>;

    /// Human readable name of the source, usually its file name
    fn source_name(&self) -> &str;
}

/// Supported input formats, selected by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Delimited text with a header row
    Csv,
    /// One code per line, no header
    Text,
    /// First worksheet of an Excel workbook
    Excel,
    /// Apache Parquet
    Parquet,
}

impl InputFormat {
    /// Detect the format of a file from its extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match file_extension(path).as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("txt") => Ok(Self::Text),
            Some("xlsx") => Ok(Self::Excel),
            Some("parquet") => Ok(Self::Parquet),
            _ => Err(ClassifierError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Rows read from one file, held as Arrow record batches
#[derive(Debug, Clone)]
pub struct TabularSource {
    name: String,
    batches: Vec<RecordBatch>,
    code_field: String,
}

impl TabularSource {
    /// Wrap record batches, detecting the code column
    ///
    /// The first candidate present in `schema` wins.
    pub fn from_batches(
        name: impl Into<String>,
        schema: &SchemaRef,
        batches: Vec<RecordBatch>,
        candidates: &[String],
    ) -> Result<Self> {
        let name = name.into();
        let code_field = detect_code_field(schema, candidates).ok_or_else(|| {
            ClassifierError::MissingCodeColumn {
                source_name: name.clone(),
                candidates: candidates.to_vec(),
            }
        })?;

        log::debug!("Using column '{code_field}' for diagnosis codes in {name}");
        Ok(Self {
            name,
            batches,
            code_field,
        })
    }

    /// Total number of rows across all batches
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }
}

impl RowSource for TabularSource {
    fn code_field(&self) -> &str {
        &self.code_field
    }

    fn codes(&self) -> Result<Vec<String>> {
        let mut codes = Vec::with_capacity(self.num_rows());
        let mut skipped = 0usize;

        for batch in &self.batches {
            let column = batch.column(batch.schema().index_of(&self.code_field)?);
            let as_text = cast(column, &DataType::Utf8)?;
            let values = as_text.as_string::<i32>();

            for idx in 0..values.len() {
                if values.is_null(idx) {
                    skipped += 1;
                } else {
                    codes.push(values.value(idx).to_string());
                }
            }
        }

        if skipped > 0 {
            log_source_warning(
                &self.name,
                &format!("skipped {skipped} empty '{}' cells", self.code_field),
            );
        }

        Ok(codes)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

/// Find the first candidate column present in a schema
#[must_use]
pub fn detect_code_field(schema: &SchemaRef, candidates: &[String]) -> Option<String> {
    candidates
        .iter()
        .find(|candidate| schema.index_of(candidate).is_ok())
        .cloned()
}

/// Read one diagnosis file
pub fn load_file(path: &Path, config: &ClassifierConfig) -> Result<TabularSource> {
    config.validate()?;
    let start = Instant::now();
    log_read_start(path);

    let (schema, batches) = match InputFormat::from_path(path)? {
        InputFormat::Csv => csv_reader::read_csv(path, config)?,
        InputFormat::Text => text_reader::read_text(path)?,
        InputFormat::Excel => excel_reader::read_excel(path, config)?,
        InputFormat::Parquet => parquet_reader::read_parquet(path, config)?,
    };

    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let source = TabularSource::from_batches(name, &schema, batches, &config.code_fields)?;

    log_read_complete(path, source.num_rows(), start.elapsed());
    Ok(source)
}

/// Read several diagnosis files in parallel
///
/// Sources are returned in the order the paths were given, so concatenating
/// them reproduces upload order. The first failing file aborts the load.
pub fn load_files(paths: &[PathBuf], config: &ClassifierConfig) -> Result<Vec<TabularSource>> {
    let progress = (config.show_progress && paths.len() > 1)
        .then(|| create_main_progress_bar(paths.len() as u64, Some("Loading diagnosis files")));

    let sources = paths
        .par_iter()
        .map(|path| {
            let source = load_file(path, config);
            if let Some(pb) = &progress {
                pb.inc(1);
            }
            source
        })
        .collect::<Result<Vec<_>>>();

    if let Some(pb) = &progress {
        finish_progress_bar(pb, Some("done"));
    }

    let sources = sources?;
    log::info!(
        "Loaded {} rows from {} files",
        sources.iter().map(TabularSource::num_rows).sum::<usize>(),
        sources.len()
    );
    Ok(sources)
}
