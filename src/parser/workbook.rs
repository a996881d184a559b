//! Workbook Parser
//!
//! calamineを使用してワークブックを開き、先頭シートを`SheetCells`に変換します。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets, Xlsx};
use std::io::{Cursor, Read};
use tracing::debug;

use crate::error::XlsxToGherkinError;
use crate::parser::SheetCells;
use crate::security::SecurityConfig;
use crate::types::{CellCoord, CellRange, CellValue, MergedRegion};

/// ワークブックパーサー
///
/// calamineのラッパーとして、ワークブックレベルの操作を提供します。
pub(crate) struct WorkbookParser {
    /// calamineのワークブック（XLSX形式のみサポート）
    workbook: Xlsx<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// ワークブックを開く
    ///
    /// 入力全体をメモリに読み込んでから解析します。
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(XlsxToGherkinError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(XlsxToGherkinError::Parse)` - ワークブックの解析に失敗した場合
    /// * `Err(XlsxToGherkinError::Config)` - XLSX以外の形式の場合
    pub fn open<R: Read>(reader: R) -> Result<Self, XlsxToGherkinError> {
        let buffer = SecurityConfig::default().read_input(reader)?;
        debug!(bytes = buffer.len(), "Opening workbook");

        let sheets = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        match sheets {
            Sheets::Xlsx(workbook) => Ok(Self { workbook }),
            _ => Err(XlsxToGherkinError::Config(
                "Only XLSX format is supported".to_string(),
            )),
        }
    }

    /// すべてのシート名を取得
    pub fn get_sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// 先頭シートを読み込む
    ///
    /// # 戻り値
    ///
    /// * `Ok(SheetCells)` - セル値と結合セル範囲を解決済みのシート
    /// * `Err(XlsxToGherkinError::Config)` - シートが1枚もない場合
    /// * `Err(XlsxToGherkinError::Parse)` - シートの解析に失敗した場合
    pub fn first_sheet(&mut self) -> Result<SheetCells, XlsxToGherkinError> {
        let sheet_name = self
            .get_sheet_names()
            .into_iter()
            .next()
            .ok_or_else(|| XlsxToGherkinError::Config("Workbook has no sheets".to_string()))?;

        self.parse_sheet(&sheet_name)
    }

    /// シートをパースして`SheetCells`を構築する
    fn parse_sheet(&mut self, sheet_name: &str) -> Result<SheetCells, XlsxToGherkinError> {
        // 1. セル値
        let range = self
            .workbook
            .worksheet_range(sheet_name)
            .map_err(|e| XlsxToGherkinError::Parse(e.into()))?;

        let mut sheet = SheetCells::new(sheet_name);
        for (coord, cell) in used_cells(&range) {
            sheet.insert(coord, Self::convert_cell(cell));
        }

        // 2. 数式セル
        // worksheet_range()は数式のキャッシュ値を返すため、数式表から数式セルを特定して上書きする
        let formulas = self
            .workbook
            .worksheet_formula(sheet_name)
            .map_err(|e| XlsxToGherkinError::Parse(e.into()))?;
        for (coord, formula) in used_cells(&formulas) {
            if !formula.is_empty() {
                sheet.insert(coord, CellValue::Formula);
            }
        }

        // 3. 結合セル範囲
        let merged_regions = match self.workbook.worksheet_merge_cells(sheet_name) {
            Some(Ok(regions)) => regions,
            Some(Err(e)) => return Err(XlsxToGherkinError::Parse(e.into())),
            None => Vec::new(),
        };
        for dims in &merged_regions {
            let start = CellCoord::new(dims.start.0, dims.start.1);
            let end = CellCoord::new(dims.end.0, dims.end.1);
            sheet.add_merged_region(MergedRegion::new(CellRange::new(start, end)));
        }

        debug!(
            sheet = sheet_name,
            merged_regions = merged_regions.len(),
            "Parsed sheet"
        );

        Ok(sheet)
    }

    /// calamineのセル値を`CellValue`に変換
    fn convert_cell(cell: &Data) -> CellValue {
        match cell {
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::String(s) => CellValue::String(s.clone()),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::Error(_) => CellValue::Error,
            Data::Empty => CellValue::Empty,
            _ => CellValue::Empty,
        }
    }
}

/// 値を持つセルを絶対座標付きで列挙する
///
/// `Range::used_cells()`の座標は範囲の開始位置からの相対座標なので、開始位置を加算する。
fn used_cells<T>(range: &Range<T>) -> impl Iterator<Item = (CellCoord, &T)> + '_
where
    T: calamine::CellType,
{
    let (row0, col0) = range.start().unwrap_or((0, 0));
    range.used_cells().map(move |(row, col, value)| {
        (
            CellCoord::new(row0 + row as u32, col0 + col as u32),
            value,
        )
    })
}
