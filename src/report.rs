//! Text, JSON and CSV rendering of records and chapter summaries

use arrow::array::{ArrayRef, StringArray, UInt64Array};
use arrow::csv::WriterBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;

use crate::error::Result;
use crate::icd11::{ChapterRange, Classification, MatchKind};
use crate::models::DiagnosisCollection;
use crate::summary::ChapterSummary;

/// Widest bar drawn in a summary table
pub const MAX_BAR_WIDTH: usize = 40;

/// Render rows as a left-aligned table with a header underline
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_cells: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
    let mut out = format_row(header_cells.as_slice());
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.push('\n');
    for row in rows {
        out.push_str(&format_row(row.as_slice()));
        out.push('\n');
    }
    out
}

/// Render the chapter table
#[must_use]
pub fn render_chapters(chapters: &[ChapterRange]) -> String {
    let rows: Vec<Vec<String>> = chapters
        .iter()
        .map(|c| vec![c.label.to_string(), c.start.to_string(), c.end.to_string()])
        .collect();
    render_table(&["Chapter", "Start", "End"], &rows)
}

/// Render records, showing at most `limit` rows when given
#[must_use]
pub fn render_records(collection: &DiagnosisCollection, limit: Option<usize>) -> String {
    let shown = limit.unwrap_or(collection.len()).min(collection.len());
    let rows: Vec<Vec<String>> = collection
        .iter()
        .take(shown)
        .enumerate()
        .map(|(idx, record)| {
            vec![
                idx.to_string(),
                record.raw_code.clone(),
                record.normalized_code.clone(),
                record.chapter.to_string(),
            ]
        })
        .collect();

    let mut out = render_table(&["#", "Code", "Normalized", "ICD Chapter"], &rows);
    if shown < collection.len() {
        out.push_str(&format!("... {} more rows\n", collection.len() - shown));
    }
    out
}

/// Render per-code classification results
#[must_use]
pub fn render_classifications(results: &[(String, Classification)]) -> String {
    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|(code, result)| {
            let kind = match result.kind {
                MatchKind::Range => "range",
                MatchKind::PrefixFallback => "prefix fallback",
                MatchKind::Unmatched => "none",
            };
            vec![code.clone(), result.chapter.to_string(), kind.to_string()]
        })
        .collect();
    render_table(&["Code", "ICD Chapter", "Match"], &rows)
}

/// Render chapter counts with a proportional bar per chapter
#[must_use]
pub fn render_summary(summary: &ChapterSummary) -> String {
    let max = summary.counts.iter().map(|c| c.count).max().unwrap_or(0);
    let rows: Vec<Vec<String>> = summary
        .counts
        .iter()
        .map(|entry| {
            let bar = if max == 0 {
                0
            } else {
                (entry.count * MAX_BAR_WIDTH).div_ceil(max)
            };
            vec![
                entry.chapter.to_string(),
                entry.count.to_string(),
                format!("{:.1}%", summary.percent(entry.count)),
                "#".repeat(bar),
            ]
        })
        .collect();

    let mut out = render_table(&["ICD Chapter", "Count", "Share", ""], &rows);
    out.push_str(&format!("Total: {}\n", summary.total));
    out
}

/// Serialize any report value as pretty JSON
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write records as CSV with a header row
pub fn write_records_csv<W: Write>(collection: &DiagnosisCollection, writer: W) -> Result<()> {
    let batch = collection.to_record_batch()?;
    let mut csv_writer = WriterBuilder::new().with_header(true).build(writer);
    csv_writer.write(&batch)?;
    Ok(())
}

/// Write chapter counts as CSV with a header row
pub fn write_summary_csv<W: Write>(summary: &ChapterSummary, writer: W) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("chapter", DataType::Utf8, false),
        Field::new("count", DataType::UInt64, false),
    ]));
    let chapters: ArrayRef = Arc::new(StringArray::from_iter_values(
        summary.counts.iter().map(|c| c.chapter),
    ));
    let counts: ArrayRef = Arc::new(UInt64Array::from_iter_values(
        summary.counts.iter().map(|c| c.count as u64),
    ));
    let batch = RecordBatch::try_new(schema, vec![chapters, counts])?;

    let mut csv_writer = WriterBuilder::new().with_header(true).build(writer);
    csv_writer.write(&batch)?;
    Ok(())
}
