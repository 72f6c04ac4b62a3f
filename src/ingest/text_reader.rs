//! Plain-text diagnosis files: one code per line, no header.

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::path::Path;
use std::sync::Arc;

use super::TEXT_CODE_FIELD;
use crate::error::Result;
use crate::error::util::safe_read_to_string;

/// Read a text file into a single batch with one `Diagnosis` column
///
/// Blank lines are skipped.
pub fn read_text(path: &Path) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let content = safe_read_to_string(path, "reading text diagnoses")?;
    let schema: SchemaRef = Arc::new(Schema::new(vec![Field::new(
        TEXT_CODE_FIELD,
        DataType::Utf8,
        false,
    )]));

    let codes: ArrayRef = Arc::new(StringArray::from_iter_values(
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>(),
    ));
    let batch = RecordBatch::try_new(schema.clone(), vec![codes])?;

    Ok((schema, vec![batch]))
}
