//! Tests for reading diagnosis files

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use icd11_classifier::error::ClassifierError;
use icd11_classifier::ingest::{RowSource, TEXT_CODE_FIELD, load_file, load_files};
use icd11_classifier::icd11::{CodeClassifier, UNKNOWN_CHAPTER};
use icd11_classifier::models::DiagnosisCollection;
use icd11_classifier::ClassifierConfig;
use parquet::arrow::ArrowWriter;
use rust_xlsxwriter::Workbook;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn config() -> ClassifierConfig {
    ClassifierConfig {
        show_progress: false,
        ..ClassifierConfig::default()
    }
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn write_parquet(path: &Path, column: &str, codes: &[&str]) {
    let schema = Arc::new(Schema::new(vec![Field::new(column, DataType::Utf8, false)]));
    let values: ArrayRef = Arc::new(StringArray::from(codes.to_vec()));
    let batch = RecordBatch::try_new(schema.clone(), vec![values]).unwrap();

    let file = File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

#[test]
fn test_csv_with_diagnosis_column() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "visits.csv",
        "patient,Diagnosis\n1,2A20\n2,1A00\n3,zzzz\n",
    );

    let source = load_file(&path, &config()).unwrap();
    assert_eq!(source.source_name(), "visits.csv");
    assert_eq!(source.code_field(), "Diagnosis");
    assert_eq!(source.codes().unwrap(), vec!["2A20", "1A00", "zzzz"]);
}

#[test]
fn test_csv_with_code_column() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "codes.csv", "code,note\n2a21,x\n8A00,y\n");

    let source = load_file(&path, &config()).unwrap();
    assert_eq!(source.code_field(), "code");
    assert_eq!(source.codes().unwrap(), vec!["2a21", "8A00"]);
}

#[test]
fn test_csv_numeric_codes_keep_spelling() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "numeric.csv", "code\n0123\n4500\n");

    let source = load_file(&path, &config()).unwrap();
    assert_eq!(source.codes().unwrap(), vec!["0123", "4500"]);
}

#[test]
fn test_csv_custom_delimiter_and_column() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "semi.csv", "id;icd\n1;NA00\n2;QA00\n");
    let config = ClassifierConfig {
        code_fields: vec!["icd".to_string()],
        csv_delimiter: ';',
        ..config()
    };

    let source = load_file(&path, &config).unwrap();
    assert_eq!(source.codes().unwrap(), vec!["NA00", "QA00"]);
}

#[test]
fn test_csv_without_code_column_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "other.csv", "patient,icd\n1,2A20\n");

    let err = load_file(&path, &config()).unwrap_err();
    assert!(matches!(err, ClassifierError::MissingCodeColumn { .. }));
    assert_eq!(err.to_string(), "No Diagnosis or code column found in other.csv");
}

#[test]
fn test_text_file_has_no_header() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "codes.txt", "2A20\n\n1A00\n   \nzzzz\n");

    let source = load_file(&path, &config()).unwrap();
    assert_eq!(source.code_field(), TEXT_CODE_FIELD);
    assert_eq!(source.codes().unwrap(), vec!["2A20", "1A00", "zzzz"]);
}

#[test]
fn test_parquet_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("codes.parquet");
    write_parquet(&path, "code", &["2A20", "HA90"]);

    let source = load_file(&path, &config()).unwrap();
    assert_eq!(source.code_field(), "code");
    assert_eq!(source.num_rows(), 2);
    assert_eq!(source.codes().unwrap(), vec!["2A20", "HA90"]);
}

#[test]
fn test_load_files_keeps_given_order() {
    let dir = TempDir::new().unwrap();
    let first = write_file(&dir, "b.csv", "Diagnosis\n2A20\n2A21\n");
    let second = write_file(&dir, "a.txt", "1A00\n");
    let third = dir.path().join("c.parquet");
    write_parquet(&third, "Diagnosis", &["zzzz"]);

    let sources = load_files(&[first, second, third], &config()).unwrap();
    let names: Vec<_> = sources.iter().map(|s| s.source_name()).collect();
    assert_eq!(names, vec!["b.csv", "a.txt", "c.parquet"]);

    let codes: Vec<String> = sources
        .iter()
        .flat_map(|s| s.codes().unwrap())
        .collect();
    assert_eq!(codes, vec!["2A20", "2A21", "1A00", "zzzz"]);
}

#[test]
fn test_load_files_fails_on_any_bad_file() {
    let dir = TempDir::new().unwrap();
    let good = write_file(&dir, "good.csv", "Diagnosis\n2A20\n");
    let bad = write_file(&dir, "bad.csv", "icd\n2A20\n");

    assert!(load_files(&[good, bad], &config()).is_err());
}

#[test]
fn test_csv_whitespace_only_cell_is_kept_and_unknown() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "blanks.csv", "patient,Diagnosis\n1,2A20\n2,  \n3,\n");

    let source = load_file(&path, &config()).unwrap();
    let codes = source.codes().unwrap();
    assert_eq!(codes, vec!["2A20", "  "]);

    let collection = DiagnosisCollection::from_codes(codes, &CodeClassifier::new());
    let blank = &collection.records()[1];
    assert_eq!(blank.raw_code, "  ");
    assert_eq!(blank.normalized_code, "");
    assert_eq!(blank.chapter, UNKNOWN_CHAPTER);
}

#[test]
fn test_csv_with_byte_order_mark() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "bom.csv", "\u{feff}Diagnosis\n2A20\n1A00\n");

    let source = load_file(&path, &config()).unwrap();
    assert_eq!(source.codes().unwrap(), vec!["2A20", "1A00"]);
}

#[test]
fn test_non_ascii_delimiter_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "codes.csv", "Diagnosis\n2A20\n");
    let config = ClassifierConfig {
        csv_delimiter: '\u{a7}',
        ..config()
    };

    let err = load_file(&path, &config).unwrap_err();
    assert!(matches!(err, ClassifierError::Config(_)));
}

#[test]
fn test_excel_first_sheet() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("visits.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "patient").unwrap();
    sheet.write_string(0, 1, "Diagnosis").unwrap();
    sheet.write_number(1, 0, 1.0).unwrap();
    sheet.write_string(1, 1, "2a20").unwrap();
    sheet.write_number(2, 0, 2.0).unwrap();
    sheet.write_number(2, 1, 1234.0).unwrap();
    sheet.write_number(3, 0, 3.0).unwrap();
    workbook.save(&path).unwrap();

    let source = load_file(&path, &config()).unwrap();
    assert_eq!(source.source_name(), "visits.xlsx");
    assert_eq!(source.code_field(), "Diagnosis");
    assert_eq!(source.codes().unwrap(), vec!["2a20", "1234"]);
}

#[test]
fn test_excel_without_code_column_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("other.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "icd").unwrap();
    sheet.write_string(1, 0, "2A20").unwrap();
    workbook.save(&path).unwrap();

    let err = load_file(&path, &config()).unwrap_err();
    assert!(matches!(err, ClassifierError::MissingCodeColumn { .. }));
}

#[test]
fn test_unsupported_extension() {
    let err = load_file(Path::new("upload.xls"), &config()).unwrap_err();
    assert!(matches!(err, ClassifierError::UnsupportedFormat(_)));
}

#[test]
fn test_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.csv");

    let err = load_file(&path, &config()).unwrap_err();
    assert!(matches!(err, ClassifierError::Io { .. }));
    assert!(err.to_string().contains("absent.csv"));
}
