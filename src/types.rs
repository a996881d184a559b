//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CellValue {
    /// 数値（日付シリアル値を含む）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// 数式セル（キャッシュ値は使用しない）
    Formula,

    /// エラー値（例: #DIV/0!）
    Error,

    /// 空セル
    Empty,
}

impl CellValue {
    /// 空セルかどうかを判定
    ///
    /// 空文字列のセルや数式セルは空セルとして扱わない。
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// セルの値を文字列として解決する
    ///
    /// * 文字列: そのまま
    /// * 数値: 0方向に切り捨てた整数（`3.9` → `"3"`, `-2.5` → `"-2"`）
    /// * 論理値: `"true"` / `"false"`
    /// * それ以外: 空文字列
    pub fn as_text(&self) -> String {
        match self {
            CellValue::String(s) => s.clone(),
            CellValue::Number(n) => (n.trunc() as i64).to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Formula | CellValue::Error | CellValue::Empty => String::new(),
        }
    }
}

/// セル座標（0始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    /// 新しい座標を生成
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// A1形式の文字列に変換（例: (0, 0) -> "A1"）
    #[allow(clippy::wrong_self_convention)]
    pub fn to_a1_notation(&self) -> String {
        let col_str = Self::col_index_to_letter(self.col);
        format!("{}{}", col_str, self.row + 1)
    }

    /// 列インデックスを文字列に変換（0 -> "A", 25 -> "Z", 26 -> "AA"）
    fn col_index_to_letter(mut col: u32) -> String {
        let mut result = String::new();
        loop {
            let remainder = col % 26;
            result.insert(0, (b'A' + remainder as u8) as char);
            if col < 26 {
                break;
            }
            col = col / 26 - 1;
        }
        result
    }
}

/// セル範囲（両端を含む）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CellRange {
    pub start: CellCoord,
    pub end: CellCoord,
}

impl CellRange {
    /// 新しい範囲を生成
    pub fn new(start: CellCoord, end: CellCoord) -> Self {
        Self { start, end }
    }

    /// 指定された座標が範囲内にあるかを判定
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row >= self.start.row
            && coord.row <= self.end.row
            && coord.col >= self.start.col
            && coord.col <= self.end.col
    }
}

/// セル結合範囲の情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MergedRegion {
    /// 結合範囲
    pub range: CellRange,

    /// 親セル（左上セル）の座標。結合範囲内のセルはすべてこのセルの値を継承する
    pub parent: CellCoord,
}

impl MergedRegion {
    /// 新しい結合範囲を生成
    pub fn new(range: CellRange) -> Self {
        Self {
            parent: range.start,
            range,
        }
    }

    /// 指定された座標が結合範囲内にあるかを判定
    pub fn contains(&self, coord: CellCoord) -> bool {
        self.range.contains(coord)
    }
}

/// シートから読み出した1行分の生データ
///
/// 値はすべて解決済み（結合セル継承を含む）だが、トリムはまだ行っていない。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct SheetRow {
    /// 行インデックス（0始まり）
    pub row: u32,
    /// グループ名（テストケース名）
    pub group: String,
    /// 前提条件
    pub precondition: String,
    /// ステップの説明
    pub description: String,
    /// ステップ種別（When / Then / And など）
    pub step_type: String,
}
