//! Public API Types
//!
//! 公開APIで使用する設定型を定義するモジュール。

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::XlsxToGherkinError;

/// 出力ディレクトリのデフォルト名
pub const DEFAULT_OUTPUT_DIR: &str = "saida_gherkin";

/// シートの列レイアウト
///
/// 各フィールドは0始まりの列インデックスです。列の自動検出は行いません。
///
/// # プリセット
///
/// - [`ColumnLayout::flat_sheet()`]: テストケース名を先頭列に持つフラットな表（デフォルト）
/// - [`ColumnLayout::story_sheet()`]: 先頭列にストーリー名、2列目にテスト名を持つ表
///
/// # JSON形式
///
/// ```json
/// {
///   "story": 0,
///   "group": 1,
///   "precondition": 2,
///   "description": 4,
///   "step_type": 5,
///   "first_data_row": 1
/// }
/// ```
///
/// `story`と`first_data_row`は省略可能です（それぞれ`null`、`1`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    /// ストーリー名の列（`None`の場合はストーリー名を読まない）
    #[serde(default)]
    pub story: Option<u32>,

    /// グループ名（テストケース名）の列。結合セルを解決して読む
    pub group: u32,

    /// 前提条件の列。結合セルを解決して読む
    pub precondition: u32,

    /// ステップ説明の列
    pub description: u32,

    /// ステップ種別（When / Then / And）の列
    pub step_type: u32,

    /// 最初のデータ行（これより前はヘッダーとして読み飛ばす）
    #[serde(default = "default_first_data_row")]
    pub first_data_row: u32,
}

fn default_first_data_row() -> u32 {
    1
}

impl ColumnLayout {
    /// フラットな表のレイアウト
    ///
    /// A列: テストケース名、B列: 前提条件、D列: 説明、F列: ステップ種別
    pub fn flat_sheet() -> Self {
        Self {
            story: None,
            group: 0,
            precondition: 1,
            description: 3,
            step_type: 5,
            first_data_row: 1,
        }
    }

    /// ストーリー付きの表のレイアウト
    ///
    /// A列: ストーリー名、B列: テスト名、C列: 前提条件、E列: 説明、F列: ステップ種別
    ///
    /// ストーリー名は先頭データ行（2行目）のA列から読み、空の場合は
    /// `XlsxToGherkinError::MissingStoryName`で変換を中断します。
    pub fn story_sheet() -> Self {
        Self {
            story: Some(0),
            group: 1,
            precondition: 2,
            description: 4,
            step_type: 5,
            first_data_row: 1,
        }
    }

    /// JSON文字列からレイアウトを読み込む
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsxgherkin::ColumnLayout;
    ///
    /// # fn main() -> Result<(), xlsxgherkin::XlsxToGherkinError> {
    /// let layout = ColumnLayout::from_json_str(
    ///     r#"{"group": 0, "precondition": 1, "description": 2, "step_type": 3}"#,
    /// )?;
    /// assert_eq!(layout.first_data_row, 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, XlsxToGherkinError> {
        Ok(serde_json::from_str(json)?)
    }

    /// JSONファイルからレイアウトを読み込む
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, XlsxToGherkinError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// レイアウトが参照するすべての列
    pub(crate) fn columns(&self) -> impl Iterator<Item = (&'static str, u32)> {
        [
            ("story", self.story),
            ("group", Some(self.group)),
            ("precondition", Some(self.precondition)),
            ("description", Some(self.description)),
            ("step_type", Some(self.step_type)),
        ]
        .into_iter()
        .filter_map(|(name, col)| col.map(|col| (name, col)))
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::flat_sheet()
    }
}

/// 出力ファイルの構成
///
/// グループ（テストケース）をどのようにファイルへ割り当てるかを指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum OutputMode {
    /// グループごとに1ファイル（デフォルト）
    ///
    /// 各ファイルにはそのグループの`Feature`ブロックのみが含まれます。
    #[default]
    PerFeature,

    /// グループごとに1ファイル、内容は累積
    ///
    /// n番目のグループのファイルには、1番目からn番目までのすべての
    /// `Feature`ブロックが含まれます。旧ツールとの出力互換用です。
    Cumulative,

    /// ストーリーごとに1ファイル
    ///
    /// ストーリー名から命名した1つのファイルに、すべての`Feature`ブロックを
    /// 出現順に書き出します。ストーリー列を持つレイアウトが必要です。
    PerStory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_sheet_is_default() {
        let layout = ColumnLayout::default();
        assert_eq!(layout, ColumnLayout::flat_sheet());
        assert_eq!(layout.story, None);
        assert_eq!(layout.group, 0);
        assert_eq!(layout.precondition, 1);
        assert_eq!(layout.description, 3);
        assert_eq!(layout.step_type, 5);
    }

    #[test]
    fn test_story_sheet_columns() {
        let layout = ColumnLayout::story_sheet();
        assert_eq!(layout.story, Some(0));
        assert_eq!(layout.group, 1);
        assert_eq!(layout.precondition, 2);
        assert_eq!(layout.description, 4);
        assert_eq!(layout.step_type, 5);
        assert_eq!(layout.first_data_row, 1);
    }

    #[test]
    fn test_from_json_str_with_defaults() {
        let layout = ColumnLayout::from_json_str(
            r#"{"group": 2, "precondition": 3, "description": 4, "step_type": 6}"#,
        )
        .unwrap();

        assert_eq!(layout.story, None);
        assert_eq!(layout.group, 2);
        assert_eq!(layout.step_type, 6);
        assert_eq!(layout.first_data_row, 1);
    }

    #[test]
    fn test_from_json_str_round_trips_story_layout() {
        let json = serde_json::to_string(&ColumnLayout::story_sheet()).unwrap();
        let layout = ColumnLayout::from_json_str(&json).unwrap();
        assert_eq!(layout, ColumnLayout::story_sheet());
    }

    #[test]
    fn test_from_json_str_missing_field() {
        let result = ColumnLayout::from_json_str(r#"{"group": 0}"#);
        assert!(matches!(result, Err(XlsxToGherkinError::Layout(_))));
    }

    #[test]
    fn test_from_json_file_not_found() {
        let result = ColumnLayout::from_json_file("no_such_layout.json");
        assert!(matches!(result, Err(XlsxToGherkinError::Io(_))));
    }

    #[test]
    fn test_columns_skips_missing_story() {
        let names: Vec<_> = ColumnLayout::flat_sheet().columns().map(|(n, _)| n).collect();
        assert_eq!(names, ["group", "precondition", "description", "step_type"]);

        let cols: Vec<_> = ColumnLayout::story_sheet().columns().map(|(_, c)| c).collect();
        assert_eq!(cols, [0, 1, 2, 4, 5]);
    }

    #[test]
    fn test_output_mode_serde_names() {
        assert_eq!(OutputMode::default(), OutputMode::PerFeature);
        assert_eq!(
            serde_json::to_string(&OutputMode::PerStory).unwrap(),
            "\"per-story\""
        );
        let mode: OutputMode = serde_json::from_str("\"cumulative\"").unwrap();
        assert_eq!(mode, OutputMode::Cumulative);
    }
}
