//! Parser Module
//!
//! calamineを使用したExcelファイル解析。
//! 先頭シートのセル値と結合セル範囲を読み込み、レイアウトに従って行を抽出します。

mod sheet;
mod workbook;

pub(crate) use sheet::SheetCells;
pub(crate) use workbook::WorkbookParser;
