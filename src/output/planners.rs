//! Output Planners Implementation
//!
//! 各出力モードの実装を提供するモジュール。

use crate::error::XlsxToGherkinError;
use crate::formatter::FeatureFormatter;
use crate::grouper::FeatureSet;
use crate::output::FeatureDocument;

/// グループごとに1ファイル（内容は独立）
pub struct PerFeaturePlanner;

impl PerFeaturePlanner {
    pub fn plan(
        &self,
        set: &FeatureSet,
        formatter: &FeatureFormatter,
    ) -> Result<Vec<FeatureDocument>, XlsxToGherkinError> {
        set.features
            .iter()
            .map(|feature| {
                Ok(FeatureDocument::new(
                    &feature.name,
                    formatter.render(feature)?,
                ))
            })
            .collect()
    }
}

/// グループごとに1ファイル（内容は先頭からの累積）
pub struct CumulativePlanner;

impl CumulativePlanner {
    pub fn plan(
        &self,
        set: &FeatureSet,
        formatter: &FeatureFormatter,
    ) -> Result<Vec<FeatureDocument>, XlsxToGherkinError> {
        let mut accumulated = String::new();
        let mut documents = Vec::with_capacity(set.features.len());

        for feature in &set.features {
            accumulated.push_str(&formatter.render(feature)?);
            documents.push(FeatureDocument::new(&feature.name, accumulated.clone()));
        }

        Ok(documents)
    }
}

/// ストーリーごとに1ファイル
pub struct PerStoryPlanner;

impl PerStoryPlanner {
    pub fn plan(
        &self,
        set: &FeatureSet,
        formatter: &FeatureFormatter,
    ) -> Result<Vec<FeatureDocument>, XlsxToGherkinError> {
        let story = set.story.as_deref().ok_or_else(|| {
            XlsxToGherkinError::Config(
                "Per-story output requires a layout with a story column".to_string(),
            )
        })?;

        // Featureが1つもない場合はファイルを作らない
        if set.features.is_empty() {
            return Ok(Vec::new());
        }

        let mut content = String::new();
        for feature in &set.features {
            content.push_str(&formatter.render(feature)?);
        }

        Ok(vec![FeatureDocument::new(story, content)])
    }
}
