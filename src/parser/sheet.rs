//! Sheet Cells
//!
//! 1枚のシートのセル値と結合セル範囲を保持し、座標ごとの値解決を提供します。

use std::collections::HashMap;

use tracing::debug;

use crate::api::ColumnLayout;
use crate::error::XlsxToGherkinError;
use crate::types::{CellCoord, CellValue, MergedRegion, SheetRow};

/// 解決済みのシート
///
/// calamineから読み出したセルを絶対座標で保持します。
/// 値のないセルは保持しません（`CellValue::Empty`として扱う）。
#[derive(Debug, Clone, Default)]
pub(crate) struct SheetCells {
    /// シート名
    name: String,

    /// セルデータ（絶対座標 → 値）
    cells: HashMap<CellCoord, CellValue>,

    /// 結合セル範囲（シート内の定義順）
    merged_regions: Vec<MergedRegion>,
}

impl SheetCells {
    /// 新しいシートを生成
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// シート名を取得
    pub fn name(&self) -> &str {
        &self.name
    }

    /// セルの値を設定（既存の値は上書き）
    pub fn insert(&mut self, coord: CellCoord, value: CellValue) {
        self.cells.insert(coord, value);
    }

    /// 結合セル範囲を追加
    pub fn add_merged_region(&mut self, region: MergedRegion) {
        self.merged_regions.push(region);
    }

    /// セルが存在する最後の行
    ///
    /// 結合範囲の終端は考慮しない。空のシートの場合は`None`。
    pub fn last_row(&self) -> Option<u32> {
        self.cells.keys().map(|coord| coord.row).max()
    }

    /// セルの値を解決する（結合セルは考慮しない）
    pub fn cell_value(&self, coord: CellCoord) -> String {
        self.cells
            .get(&coord)
            .map(CellValue::as_text)
            .unwrap_or_default()
    }

    /// 結合セルを考慮してセルの値を解決する
    ///
    /// 対象セルが空の場合のみ結合範囲を定義順に走査し、最初に座標を含む
    /// 範囲の親セル（左上セル）の値を返します。親セル自体は結合を考慮せずに解決します。
    /// どの範囲にも含まれない場合は空文字列を返します。
    pub fn merged_cell_value(&self, coord: CellCoord) -> String {
        match self.cells.get(&coord) {
            Some(value) if !value.is_blank() => value.as_text(),
            _ => self
                .merged_regions
                .iter()
                .find(|region| region.contains(coord))
                .map(|region| self.cell_value(region.parent))
                .unwrap_or_default(),
        }
    }

    /// ストーリー名を読み出す
    ///
    /// # 戻り値
    ///
    /// * `Ok(None)` - レイアウトにストーリー列がない場合
    /// * `Ok(Some(String))` - ストーリー名
    /// * `Err(XlsxToGherkinError::MissingStoryName)` - ストーリー名が空の場合
    pub fn story_name(&self, layout: &ColumnLayout) -> Result<Option<String>, XlsxToGherkinError> {
        let Some(col) = layout.story else {
            return Ok(None);
        };

        let coord = CellCoord::new(layout.first_data_row, col);
        let story = self.merged_cell_value(coord);
        if story.trim().is_empty() {
            return Err(XlsxToGherkinError::MissingStoryName {
                sheet: self.name.clone(),
                cell: coord.to_a1_notation(),
            });
        }

        Ok(Some(story))
    }

    /// レイアウトに従ってデータ行を読み出す
    ///
    /// グループ名と前提条件は結合セルを解決して読み、説明とステップ種別は
    /// セル単体の値を読みます。空行のフィルタリングは行いません。
    pub fn rows(&self, layout: &ColumnLayout) -> Vec<SheetRow> {
        let Some(last_row) = self.last_row() else {
            return Vec::new();
        };
        if last_row < layout.first_data_row {
            return Vec::new();
        }

        debug!(
            sheet = %self.name,
            first_row = layout.first_data_row,
            last_row,
            merged_regions = self.merged_regions.len(),
            "Reading sheet rows"
        );

        (layout.first_data_row..=last_row)
            .map(|row| SheetRow {
                row,
                group: self.merged_cell_value(CellCoord::new(row, layout.group)),
                precondition: self.merged_cell_value(CellCoord::new(row, layout.precondition)),
                description: self.cell_value(CellCoord::new(row, layout.description)),
                step_type: self.cell_value(CellCoord::new(row, layout.step_type)),
            })
            .collect()
    }
}
