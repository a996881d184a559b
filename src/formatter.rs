//! Formatter Module
//!
//! `Feature`をGherkin形式のテキストに変換するモジュール。

use std::borrow::Cow;
use std::io::Write;

use crate::error::XlsxToGherkinError;
use crate::grouper::Feature;

/// ステップ種別をGherkinのキーワードに変換する
///
/// `when` / `then` / `and`（大文字小文字を区別しない）は`When` / `Then` / `And`に
/// 変換し、それ以外はそのまま返します。
///
/// # 例
///
/// ```rust
/// use xlsxgherkin::step_keyword;
///
/// assert_eq!(step_keyword("WHEN"), "When");
/// assert_eq!(step_keyword("then"), "Then");
/// assert_eq!(step_keyword("Note"), "Note");
/// ```
pub fn step_keyword(step_type: &str) -> Cow<'_, str> {
    match step_type.to_uppercase().as_str() {
        "WHEN" => Cow::Borrowed("When"),
        "THEN" => Cow::Borrowed("Then"),
        "AND" => Cow::Borrowed("And"),
        _ => Cow::Borrowed(step_type),
    }
}

/// Featureフォーマッター
///
/// 出力形式:
///
/// ```text
/// Feature: <テストケース名>
///
/// Given <前提条件>          (前提条件がある場合のみ)
/// <キーワード> <説明>       (ステップごとに1行)
///
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct FeatureFormatter;

impl FeatureFormatter {
    /// 新しいFeatureFormatterインスタンスを生成
    pub fn new() -> Self {
        Self
    }

    /// `Feature`を書き出す
    pub fn write<W: Write>(&self, feature: &Feature, writer: &mut W) -> Result<(), XlsxToGherkinError> {
        writeln!(writer, "Feature: {}", feature.name)?;
        writeln!(writer)?;

        if let Some(precondition) = feature.precondition() {
            writeln!(writer, "Given {}", precondition)?;
        }

        for step in &feature.steps {
            writeln!(writer, "{} {}", step_keyword(&step.step_type), step.description)?;
        }

        writeln!(writer)?;
        Ok(())
    }

    /// `Feature`を文字列に変換
    pub fn render(&self, feature: &Feature) -> Result<String, XlsxToGherkinError> {
        let mut buffer = Vec::new();
        self.write(feature, &mut buffer)?;

        String::from_utf8(buffer).map_err(|e| {
            XlsxToGherkinError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}
