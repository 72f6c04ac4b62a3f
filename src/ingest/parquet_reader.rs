//! Parquet diagnosis files

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::path::Path;

use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::error::util::safe_open_file;

/// Read a parquet file into Arrow record batches
pub fn read_parquet(
    path: &Path,
    config: &ClassifierConfig,
) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let file = safe_open_file(path, "reading parquet diagnoses")?;

    let reader_builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = reader_builder.schema().clone();
    let reader = reader_builder.with_batch_size(config.batch_size).build()?;

    let mut batches = Vec::new();
    for batch_result in reader {
        batches.push(batch_result?);
    }

    Ok((schema, batches))
}
