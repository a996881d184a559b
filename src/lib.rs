//! xlsxgherkin - Pure-Rust converter from test-case spreadsheets to Gherkin
//!
//! This crate reads a spreadsheet (XLSX) describing manual test cases and writes
//! one Gherkin `Feature` file per test case. Rows are grouped by test-case name;
//! each row contributes a step (`When` / `Then` / `And`) and optionally a
//! precondition, emitted once as `Given`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xlsxgherkin::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a converter with default settings (flat layout, one file per test case)
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     // Convert and write feature files into ./saida_gherkin
//!     let report = converter.convert_file("test_cases.xlsx", "saida_gherkin")?;
//!     println!("{} files written", report.files.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Story Sheets
//!
//! Sheets whose first column holds the user-story name and whose second column
//! holds the test name use [`ColumnLayout::story_sheet`]. With
//! [`OutputMode::PerStory`] every test of the story goes into a single file:
//!
//! ```rust,no_run
//! use xlsxgherkin::{ColumnLayout, ConverterBuilder, OutputMode};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_layout(ColumnLayout::story_sheet())
//!         .with_output_mode(OutputMode::PerStory)
//!         .build()?;
//!
//!     converter.convert_file("stories.xlsx", "saida_gherkin")?;
//!     Ok(())
//! }
//! ```
//!
//! # In-Memory Conversion
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use xlsxgherkin::ConverterBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = ConverterBuilder::new().build()?;
//! let excel_data: Vec<u8> = vec![]; // Your Excel file bytes
//! for document in converter.convert(Cursor::new(excel_data))? {
//!     println!("{}:\n{}", document.file_name, document.content);
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod error;
mod formatter;
mod grouper;
mod output;
mod parser;
mod security;
mod types;

// 公開API
pub use api::{ColumnLayout, OutputMode, DEFAULT_OUTPUT_DIR};
pub use builder::{ConversionReport, Converter, ConverterBuilder};
pub use error::XlsxToGherkinError;
pub use formatter::step_keyword;
pub use grouper::{Feature, FeatureSet, Step};
pub use output::FeatureDocument;
