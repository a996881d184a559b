//! Output Module
//!
//! Strategy Patternによる出力ファイル構成の抽象化と、ファイルへの書き出しを提供するモジュール。

mod planners;

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::api::OutputMode;
use crate::error::XlsxToGherkinError;
use crate::formatter::FeatureFormatter;
use crate::grouper::FeatureSet;
use crate::security::sanitize_file_stem;

pub use planners::*;

/// 出力ファイル1つ分の内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureDocument {
    /// ファイル名（無害化済みの名前 + `.txt`）
    pub file_name: String,

    /// ファイルの内容（UTF-8）
    pub content: String,
}

impl FeatureDocument {
    /// 名前からファイル名を決めてドキュメントを生成
    pub fn new(name: &str, content: String) -> Self {
        let stem = sanitize_file_stem(name);
        if stem.is_empty() {
            warn!(name, "Name has no file-name-safe characters; writing '.txt'");
        }

        Self {
            file_name: format!("{}.txt", stem),
            content,
        }
    }
}

/// 出力プランナー（Strategy Pattern）
///
/// 各出力モードをenumとして表現します。
#[derive(Debug, Clone, Copy)]
pub(crate) enum OutputPlanner {
    PerFeature,
    Cumulative,
    PerStory,
}

impl OutputPlanner {
    /// 出力モードからプランナーを生成
    pub fn from_mode(mode: OutputMode) -> Self {
        match mode {
            OutputMode::PerFeature => OutputPlanner::PerFeature,
            OutputMode::Cumulative => OutputPlanner::Cumulative,
            OutputMode::PerStory => OutputPlanner::PerStory,
        }
    }

    /// 書き出すドキュメントを決定する
    ///
    /// ドキュメントはFeatureの出現順に並びます。
    pub fn plan(
        &self,
        set: &FeatureSet,
        formatter: &FeatureFormatter,
    ) -> Result<Vec<FeatureDocument>, XlsxToGherkinError> {
        match self {
            OutputPlanner::PerFeature => PerFeaturePlanner.plan(set, formatter),
            OutputPlanner::Cumulative => CumulativePlanner.plan(set, formatter),
            OutputPlanner::PerStory => PerStoryPlanner.plan(set, formatter),
        }
    }
}

/// ドキュメントを出力ディレクトリに書き出す
///
/// ディレクトリが存在しない場合は作成します。同名のファイルは上書きします。
/// 途中で書き込みに失敗した場合、それまでに書き出したファイルはそのまま残ります。
///
/// # 戻り値
///
/// * `Ok(Vec<PathBuf>)` - 書き出したファイルのパス（書き出し順）
/// * `Err(XlsxToGherkinError::Io)` - ディレクトリ作成・書き込みに失敗した場合
pub(crate) fn write_documents(
    output_dir: &Path,
    documents: &[FeatureDocument],
) -> Result<Vec<PathBuf>, XlsxToGherkinError> {
    std::fs::create_dir_all(output_dir)?;

    let mut written: Vec<PathBuf> = Vec::with_capacity(documents.len());
    for document in documents {
        let path = output_dir.join(&document.file_name);
        if written.contains(&path) {
            warn!(path = %path.display(), "File name collision; overwriting previous feature");
        }

        let mut writer = BufWriter::new(File::create(&path)?);
        writer.write_all(document.content.as_bytes())?;
        writer.flush()?;

        info!(path = %path.display(), "Feature file written");
        written.push(path);
    }

    Ok(written)
}
