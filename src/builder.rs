//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::api::{ColumnLayout, OutputMode};
use crate::error::XlsxToGherkinError;
use crate::formatter::FeatureFormatter;
use crate::grouper::{group_rows, FeatureSet};
use crate::output::{write_documents, FeatureDocument, OutputPlanner};
use crate::parser::WorkbookParser;

/// Excelの最大行数
const MAX_ROWS: u32 = 1_048_576;

/// Excelの最大列数（XFD）
const MAX_COLS: u32 = 16_384;

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone, Default)]
pub(crate) struct ConversionConfig {
    /// 列レイアウト
    pub layout: ColumnLayout,

    /// 出力ファイルの構成
    pub output_mode: OutputMode,
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxgherkin::{ColumnLayout, ConverterBuilder, OutputMode};
///
/// # fn main() -> Result<(), xlsxgherkin::XlsxToGherkinError> {
/// let converter = ConverterBuilder::new()
///     .with_layout(ColumnLayout::story_sheet())
///     .with_output_mode(OutputMode::PerStory)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 列レイアウト: `ColumnLayout::flat_sheet()`
    /// - 出力モード: `OutputMode::PerFeature`
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 列レイアウトを指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxgherkin::{ColumnLayout, ConverterBuilder};
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_layout(ColumnLayout::story_sheet());
    /// ```
    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.config.layout = layout;
        self
    }

    /// 出力ファイルの構成を指定する
    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.config.output_mode = mode;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxToGherkinError::Config(String)`: 設定の検証に失敗した場合
    ///   * 列インデックスがExcelの最大列数以上
    ///   * 先頭データ行がExcelの最大行数以上
    ///   * `OutputMode::PerStory`なのにストーリー列がない
    pub fn build(self) -> Result<Converter, XlsxToGherkinError> {
        let layout = &self.config.layout;

        // 1. 列インデックスの検証
        for (name, col) in layout.columns() {
            if col >= MAX_COLS {
                return Err(XlsxToGherkinError::Config(format!(
                    "Invalid layout: {} column ({}) exceeds maximum ({})",
                    name,
                    col,
                    MAX_COLS - 1
                )));
            }
        }

        // 2. 先頭データ行の検証
        if layout.first_data_row >= MAX_ROWS {
            return Err(XlsxToGherkinError::Config(format!(
                "Invalid layout: first data row ({}) exceeds maximum ({})",
                layout.first_data_row,
                MAX_ROWS - 1
            )));
        }

        // 3. 出力モードとレイアウトの整合性
        if self.config.output_mode == OutputMode::PerStory && layout.story.is_none() {
            return Err(XlsxToGherkinError::Config(
                "Per-story output requires a layout with a story column".to_string(),
            ));
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換結果のサマリー
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    /// 入力ファイル
    pub input: PathBuf,

    /// 出力ディレクトリ
    pub output_dir: PathBuf,

    /// ストーリー名（ストーリー列を持つレイアウトの場合のみ）
    pub story: Option<String>,

    /// Feature数
    pub features: usize,

    /// ステップ数
    pub steps: usize,

    /// 読み飛ばした行数
    pub skipped_rows: usize,

    /// 書き出したファイル（書き出し順）
    pub files: Vec<PathBuf>,
}

/// 変換処理のファサード
///
/// テストケース表（XLSX）をGherkin形式のfeatureファイルに変換するための
/// メインエントリーポイントです。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxgherkin::{ConverterBuilder, DEFAULT_OUTPUT_DIR};
///
/// # fn main() -> Result<(), xlsxgherkin::XlsxToGherkinError> {
/// let converter = ConverterBuilder::new().build()?;
/// let report = converter.convert_file("casos_de_teste.xlsx", DEFAULT_OUTPUT_DIR)?;
/// println!("{} feature files written", report.files.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// Featureフォーマッター
    formatter: FeatureFormatter,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self {
            formatter: FeatureFormatter::new(),
            config,
        }
    }

    /// 列レイアウトを取得
    pub fn layout(&self) -> &ColumnLayout {
        &self.config.layout
    }

    /// 出力モードを取得
    pub fn output_mode(&self) -> OutputMode {
        self.config.output_mode
    }

    /// ワークブックの先頭シートからFeatureを抽出する
    ///
    /// # 処理フロー
    ///
    /// 1. ワークブックを開き、先頭シートを読み込む
    /// 2. ストーリー名を読む（レイアウトにストーリー列がある場合）
    /// 3. レイアウトに従って行を抽出する
    /// 4. テストケース名でグループ化する
    ///
    /// # 戻り値
    ///
    /// * `Ok(FeatureSet)` - 抽出されたFeature
    /// * `Err(XlsxToGherkinError)` - 読み込み・解析に失敗した場合、またはストーリー名が空の場合
    pub fn read_features<R: Read>(&self, input: R) -> Result<FeatureSet, XlsxToGherkinError> {
        let layout = &self.config.layout;

        let sheet = {
            let mut parser = WorkbookParser::open(input)?;
            parser.first_sheet()?
        };

        let story = sheet.story_name(layout)?;
        let rows = sheet.rows(layout);
        let set = group_rows(rows, story);

        info!(
            sheet = sheet.name(),
            features = set.features.len(),
            steps = set.step_count(),
            skipped_rows = set.skipped_rows,
            "Features extracted"
        );

        Ok(set)
    }

    /// 抽出済みのFeatureから出力ドキュメントを生成する
    pub fn render(&self, set: &FeatureSet) -> Result<Vec<FeatureDocument>, XlsxToGherkinError> {
        OutputPlanner::from_mode(self.config.output_mode).plan(set, &self.formatter)
    }

    /// ワークブックを出力ドキュメントに変換する（ファイルへの書き出しは行わない）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use std::fs::File;
    /// use xlsxgherkin::ConverterBuilder;
    ///
    /// # fn main() -> Result<(), xlsxgherkin::XlsxToGherkinError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// for document in converter.convert(File::open("casos.xlsx")?)? {
    ///     println!("== {}\n{}", document.file_name, document.content);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert<R: Read>(&self, input: R) -> Result<Vec<FeatureDocument>, XlsxToGherkinError> {
        let set = self.read_features(input)?;
        self.render(&set)
    }

    /// ワークブックファイルを変換し、出力ディレクトリに書き出す
    ///
    /// 読み込みと変換がすべて成功してから書き出しを始めるため、
    /// 読み込みに失敗した場合はファイルが一切作られません。
    ///
    /// # 引数
    ///
    /// * `input` - 入力ワークブックのパス
    /// * `output_dir` - 出力ディレクトリ（存在しない場合は作成）
    pub fn convert_file<P, Q>(&self, input: P, output_dir: Q) -> Result<ConversionReport, XlsxToGherkinError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let input = input.as_ref();
        let output_dir = output_dir.as_ref();

        let set = self.read_features(File::open(input)?)?;
        let documents = self.render(&set)?;
        let files = write_documents(output_dir, &documents)?;

        Ok(ConversionReport {
            input: input.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            features: set.features.len(),
            steps: set.step_count(),
            skipped_rows: set.skipped_rows,
            story: set.story,
            files,
        })
    }
}
