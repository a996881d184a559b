//! Security Tests
//!
//! Output file names must never escape the output directory, and malformed
//! input must fail before anything is written.

use rust_xlsxwriter::*;
use std::io::Cursor;
use xlsxgherkin::{ConverterBuilder, XlsxToGherkinError};

fn generate_named_groups(names: &[&str]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Caso")?;

    for (i, name) in names.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.write_string(row, 0, *name)?;
        worksheet.write_string(row, 3, "does something")?;
        worksheet.write_string(row, 5, "When")?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Path traversal through a test-case name
#[test]
fn test_path_traversal_in_group_name() {
    let data = generate_named_groups(&["../../etc/passwd", "..\\..\\boot.ini", "/abs/path"]).unwrap();
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("evil.xlsx");
    std::fs::write(&input, data).unwrap();
    let out_dir = temp.path().join("out");

    let converter = ConverterBuilder::new().build().unwrap();
    let report = converter.convert_file(&input, &out_dir).unwrap();

    let names: Vec<_> = report
        .files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["etcpasswd.txt", "bootini.txt", "abspath.txt"]);
    for path in &report.files {
        assert_eq!(path.parent(), Some(out_dir.as_path()));
    }
}

/// Arbitrary bytes are rejected before the output directory is created
#[test]
fn test_garbage_input_writes_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("not_excel.xlsx");
    std::fs::write(&input, b"this is definitely not a workbook").unwrap();
    let out_dir = temp.path().join("out");

    let converter = ConverterBuilder::new().build().unwrap();
    let result = converter.convert_file(&input, &out_dir);

    assert!(result.is_err());
    assert!(!out_dir.exists());
}

/// A CSV payload is not accepted as a workbook
#[test]
fn test_non_xlsx_input_is_rejected() {
    let converter = ConverterBuilder::new().build().unwrap();
    let result = converter.convert(Cursor::new(b"Caso,Descricao,Tipo\nLogin,abre,When\n".to_vec()));

    match result {
        Err(XlsxToGherkinError::Parse(_)) | Err(XlsxToGherkinError::Config(_)) => {}
        other => panic!("Unexpected result: {:?}", other),
    }
}
