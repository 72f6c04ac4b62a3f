//! CSV diagnosis files
//!
//! Every column is read as text so codes such as `1A00` and purely numeric
//! codes keep their exact spelling.

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;

use crate::config::ClassifierConfig;
use crate::error::util::safe_open_file;
use crate::error::{ClassifierError, Result};

/// Rows sampled when discovering the column layout
const SCHEMA_SAMPLE_ROWS: usize = 100;

/// Read a CSV file into Arrow record batches with all columns as `Utf8`
pub fn read_csv(path: &Path, config: &ClassifierConfig) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let mut file = safe_open_file(path, "reading CSV diagnoses")?;

    let format = Format::default()
        .with_header(config.csv_has_header)
        .with_delimiter(config.delimiter_byte()?);

    let (inferred, _) = format.infer_schema(&mut file, Some(SCHEMA_SAMPLE_ROWS))?;
    file.rewind().map_err(|e| {
        ClassifierError::io_error_with_source("Failed to rewind CSV file", e).with_path(path)
    })?;

    let schema: SchemaRef = Arc::new(Schema::new(
        inferred
            .fields()
            .iter()
            .map(|field| Field::new(field.name(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let reader = ReaderBuilder::new(schema.clone())
        .with_format(format)
        .with_batch_size(config.batch_size)
        .build(file)?;

    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;
    Ok((schema, batches))
}
