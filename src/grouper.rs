//! Grouper Module
//!
//! シートの行をテストケース名ごとにまとめ、Gherkinの`Feature`単位に変換するモジュール。

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::types::SheetRow;

/// Gherkinのステップ
///
/// 値はすべてトリム済みです。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// ステップ種別（シートに書かれたまま。キーワードへの変換は出力時に行う）
    pub step_type: String,

    /// ステップの説明
    pub description: String,

    /// この行に書かれていた前提条件（空の場合あり）
    pub precondition: String,
}

impl Step {
    /// 新しいステップを生成（各値はトリムされる）
    pub fn new(step_type: &str, description: &str, precondition: &str) -> Self {
        Self {
            step_type: step_type.trim().to_string(),
            description: description.trim().to_string(),
            precondition: precondition.trim().to_string(),
        }
    }
}

/// 同じテストケース名を持つステップの集まり
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feature {
    /// テストケース名（シートの値そのまま。トリムしない）
    pub name: String,

    /// 行の出現順に並んだステップ
    pub steps: Vec<Step>,
}

impl Feature {
    /// 共通の前提条件
    ///
    /// 行の出現順で最初の空でない前提条件を返します。2つ目以降は
    /// 内容が異なっていても無視されます。
    pub fn precondition(&self) -> Option<&str> {
        self.steps
            .iter()
            .map(|step| step.precondition.as_str())
            .find(|precondition| !precondition.is_empty())
    }
}

/// シートから抽出したすべての`Feature`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FeatureSet {
    /// ストーリー名（ストーリー列を持つレイアウトの場合のみ）
    pub story: Option<String>,

    /// 最初に出現した順の`Feature`
    pub features: Vec<Feature>,

    /// 必須項目が空のため読み飛ばした行数
    pub skipped_rows: usize,
}

impl FeatureSet {
    /// 全`Feature`のステップ数の合計
    pub fn step_count(&self) -> usize {
        self.features.iter().map(|f| f.steps.len()).sum()
    }
}

/// 行をテストケース名でグループ化する
///
/// グループ名・説明・ステップ種別のいずれかが空文字列の行は読み飛ばします
/// （行だけを除外し、グループ全体は除外しない）。空判定はトリム前の値で行います。
/// グループはキーの完全一致（大文字小文字を区別、トリムなし）でまとめ、
/// 最初に出現した順序を保持します。
pub(crate) fn group_rows<I>(rows: I, story: Option<String>) -> FeatureSet
where
    I: IntoIterator<Item = SheetRow>,
{
    let mut groups: IndexMap<String, Vec<Step>> = IndexMap::new();
    let mut skipped_rows = 0;

    for row in rows {
        if row.group.is_empty() || row.description.is_empty() || row.step_type.is_empty() {
            debug!(row = row.row + 1, "Skipping row with empty required field");
            skipped_rows += 1;
            continue;
        }

        groups
            .entry(row.group)
            .or_default()
            .push(Step::new(&row.step_type, &row.description, &row.precondition));
    }

    let features = groups
        .into_iter()
        .map(|(name, steps)| Feature { name, steps })
        .collect();

    FeatureSet {
        story,
        features,
        skipped_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(group: &str, precondition: &str, description: &str, step_type: &str) -> SheetRow {
        SheetRow {
            row: 0,
            group: group.to_string(),
            precondition: precondition.to_string(),
            description: description.to_string(),
            step_type: step_type.to_string(),
        }
    }

    #[test]
    fn test_group_rows_preserves_encounter_order() {
        let set = group_rows(
            vec![
                row("B", "", "b1", "When"),
                row("A", "", "a1", "When"),
                row("B", "", "b2", "Then"),
            ],
            None,
        );

        let names: Vec<_> = set.features.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
        assert_eq!(set.features[0].steps.len(), 2);
        assert_eq!(set.features[0].steps[1].description, "b2");
        assert_eq!(set.step_count(), 3);
    }

    #[test]
    fn test_group_rows_skips_rows_with_empty_fields() {
        let set = group_rows(
            vec![
                row("Login", "user exists", "", "When"),
                row("", "", "orphan", "When"),
                row("Login", "", "opens app", ""),
                row("Login", "", "opens app", "When"),
            ],
            None,
        );

        assert_eq!(set.skipped_rows, 3);
        assert_eq!(set.features.len(), 1);
        assert_eq!(set.features[0].steps.len(), 1);
        // 読み飛ばした行の前提条件は使われない
        assert_eq!(set.features[0].precondition(), None);
    }

    #[test]
    fn test_group_rows_key_is_exact() {
        let set = group_rows(
            vec![
                row("Login", "", "a", "When"),
                row("login", "", "b", "When"),
                row("Login ", "", "c", "When"),
            ],
            None,
        );

        assert_eq!(set.features.len(), 3);
        assert_eq!(set.features[2].name, "Login ");
    }

    #[test]
    fn test_group_rows_whitespace_only_fields_are_kept() {
        // 空判定はトリム前の値で行うため、空白のみの説明は読み飛ばされない
        let set = group_rows(vec![row("Login", "", "   ", "When")], None);

        assert_eq!(set.skipped_rows, 0);
        assert_eq!(set.features[0].steps[0].description, "");
    }

    #[test]
    fn test_step_values_are_trimmed() {
        let set = group_rows(vec![row("Login", "  user exists ", " opens app ", " when ")], None);

        let step = &set.features[0].steps[0];
        assert_eq!(step.step_type, "when");
        assert_eq!(step.description, "opens app");
        assert_eq!(step.precondition, "user exists");
    }

    #[test]
    fn test_precondition_first_non_empty_wins() {
        let set = group_rows(
            vec![
                row("Login", "", "a", "When"),
                row("Login", "first", "b", "Then"),
                row("Login", "second", "c", "And"),
            ],
            None,
        );

        assert_eq!(set.features[0].precondition(), Some("first"));
    }

    #[test]
    fn test_group_rows_keeps_story() {
        let set = group_rows(Vec::new(), Some("Checkout".to_string()));
        assert_eq!(set.story.as_deref(), Some("Checkout"));
        assert!(set.features.is_empty());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_row() -> impl Strategy<Value = SheetRow> {
            (
                prop::sample::select(vec!["", "A", "B", "C"]),
                prop::sample::select(vec!["", "pre1", "pre2"]),
                prop::sample::select(vec!["", "d1", "d2"]),
                prop::sample::select(vec!["", "When", "Then", "And"]),
            )
                .prop_map(|(g, p, d, t)| row(g, p, d, t))
        }

        proptest! {
            #[test]
            fn test_every_row_is_grouped_or_skipped(rows in prop::collection::vec(arb_row(), 0..40)) {
                let valid: Vec<_> = rows
                    .iter()
                    .filter(|r| !r.group.is_empty() && !r.description.is_empty() && !r.step_type.is_empty())
                    .cloned()
                    .collect();

                let set = group_rows(rows.clone(), None);

                prop_assert_eq!(set.step_count(), valid.len());
                prop_assert_eq!(set.skipped_rows, rows.len() - valid.len());

                for feature in &set.features {
                    let expected_pre = valid
                        .iter()
                        .filter(|r| r.group == feature.name)
                        .map(|r| r.precondition.as_str())
                        .find(|p| !p.is_empty());
                    prop_assert_eq!(feature.precondition(), expected_pre);
                }
            }
        }
    }
}
