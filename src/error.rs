//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsxgherkinクレート全体で使用するエラー型
///
/// Excelファイルの読み込み、行の抽出、Gherkinファイルの書き出し中に発生する
/// すべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み込み・書き込み失敗など）
/// - `Parse`: Excelファイルの解析中に発生したエラー（calamine由来）
/// - `Layout`: 列レイアウト定義（JSON）の解析エラー
/// - `Config`: 設定の検証に失敗したエラー
/// - `MissingStoryName`: ストーリー名が必要なレイアウトでストーリー名が空
/// - `SecurityViolation`: 入力サイズ制限などのセキュリティ制限違反
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxgherkin::XlsxToGherkinError;
/// use std::fs::File;
///
/// fn open_sheet(path: &str) -> Result<(), XlsxToGherkinError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     // ... 処理 ...
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxToGherkinError {
    /// I/O操作中に発生したエラー
    ///
    /// 入力ファイルの読み込み失敗、出力ディレクトリの作成失敗、
    /// featureファイルの書き込み失敗などで使用されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excelファイルの解析中に発生したエラー
    ///
    /// calamineクレートがワークブックを解析する際に発生したエラーです。
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    #[error("Failed to parse Excel file: {0}")]
    Parse(#[from] calamine::Error),

    /// 列レイアウト定義の解析エラー
    ///
    /// `ColumnLayout::from_json_str()`などでJSONの読み込みに失敗した場合に発生します。
    #[error("Invalid column layout: {0}")]
    Layout(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時の検証失敗のほか、XLSX以外の形式や
    /// シートを1枚も含まないワークブックでも使用されます。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use xlsxgherkin::{ColumnLayout, ConverterBuilder, OutputMode, XlsxToGherkinError};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_layout(ColumnLayout::flat_sheet())
    ///     .with_output_mode(OutputMode::PerStory)  // ストーリー列がないため無効
    ///     .build();
    ///
    /// if let Err(XlsxToGherkinError::Config(msg)) = result {
    ///     println!("設定エラー: {}", msg);
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// ストーリー名が見つからないエラー
    ///
    /// ストーリー列を持つレイアウトで、先頭データ行のストーリー名セルが
    /// 空の場合に発生します。このエラーが発生した場合、ファイルは一切出力されません。
    #[error("Story name is missing at sheet '{sheet}', cell {cell}")]
    MissingStoryName {
        /// 対象シート名
        sheet: String,
        /// ストーリー名を期待したセルの座標（A1記法）
        cell: String,
    },

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限を超えた場合などに発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: XlsxToGherkinError = io_err.into();

        match error {
            XlsxToGherkinError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_parse_error_display() {
        let error: XlsxToGherkinError = calamine::Error::Msg("Corrupted file").into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("Failed to parse Excel file"));
        assert!(error_msg.contains("Corrupted file"));
    }

    #[test]
    fn test_layout_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: XlsxToGherkinError = serde_err.into();

        assert!(matches!(error, XlsxToGherkinError::Layout(_)));
        assert!(error.to_string().starts_with("Invalid column layout"));
    }

    #[test]
    fn test_missing_story_name_display() {
        let error = XlsxToGherkinError::MissingStoryName {
            sheet: "Casos".to_string(),
            cell: "A2".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Story name is missing at sheet 'Casos', cell A2"
        );
    }

    // ?演算子による変換の確認
    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), XlsxToGherkinError> {
            let _file = std::fs::File::open("nonexistent_cases.xlsx")?;
            Ok(())
        }

        match io_operation() {
            Err(XlsxToGherkinError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }

    #[test]
    fn test_all_error_formats() {
        let config_err = XlsxToGherkinError::Config("test config".to_string());
        assert!(config_err.to_string().starts_with("Configuration error"));

        let security_err = XlsxToGherkinError::SecurityViolation("too large".to_string());
        assert!(security_err.to_string().starts_with("Security violation"));
    }
}
