//! Excel diagnosis workbooks
//!
//! Only the first worksheet is read. Its first row names the columns and
//! every cell below it becomes text, so a numeric code such as `1234` keeps
//! the spelling shown in the spreadsheet.

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use calamine::{Data, Reader, Xlsx};
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::error::util::safe_open_file;

/// Text of one cell, `None` when the cell is empty
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        other => Some(other.to_string()),
    }
}

/// Read the first worksheet of an `.xlsx` file into `Utf8` record batches
pub fn read_excel(path: &Path, config: &ClassifierConfig) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let file = safe_open_file(path, "reading Excel diagnoses")?;
    let mut workbook: Xlsx<_> = Xlsx::new(BufReader::new(file)).map_err(calamine::Error::Xlsx)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(calamine::Error::Msg("workbook has no worksheets"))?
        .map_err(calamine::Error::Xlsx)?;

    let mut rows = range.rows();
    let header = rows.next().unwrap_or_default();
    let schema: SchemaRef = Arc::new(Schema::new(
        header
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                let name = cell_text(cell).unwrap_or_else(|| format!("column_{idx}"));
                Field::new(name, DataType::Utf8, true)
            })
            .collect::<Vec<_>>(),
    ));

    let body: Vec<&[Data]> = rows.collect();
    let mut batches = Vec::with_capacity(body.len().div_ceil(config.batch_size.max(1)));
    for chunk in body.chunks(config.batch_size.max(1)) {
        let columns: Vec<ArrayRef> = (0..header.len())
            .map(|col| {
                let values: StringArray = chunk
                    .iter()
                    .map(|row| row.get(col).and_then(cell_text))
                    .collect();
                Arc::new(values) as ArrayRef
            })
            .collect();
        batches.push(RecordBatch::try_new(schema.clone(), columns)?);
    }

    log::debug!(
        "Read {} rows and {} columns from the first sheet of {}",
        body.len(),
        header.len(),
        path.display()
    );
    Ok((schema, batches))
}
