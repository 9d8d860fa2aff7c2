//! Recommender configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! gives the standard behavior.

use crate::error::{RecommendError, RecommendResult};
use data_loader::{DataLoadError, StarRating};
use serde::Deserialize;
use similarity::VectorizerConfig;
use sources::HistoryPolicy;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecommenderConfig {
    /// TF-IDF vocabulary thresholds, shared by both matrices
    #[serde(default)]
    pub vectorizer: VectorizerConfig,

    /// Number of results for "more like this"
    #[serde(default = "default_seed_limit")]
    pub seed_limit: usize,

    /// How a rating history becomes recommendations
    #[serde(default)]
    pub history_policy: HistoryPolicy,

    /// Candidates scoring below this are dropped
    #[serde(default)]
    pub min_score: f64,
}

fn default_seed_limit() -> usize {
    5
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            vectorizer: VectorizerConfig::default(),
            seed_limit: default_seed_limit(),
            history_policy: HistoryPolicy::default(),
            min_score: 0.0,
        }
    }
}

impl RecommenderConfig {
    /// Read a JSON config file
    pub fn from_file(path: &Path) -> RecommendResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => DataLoadError::IoError(e),
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| DataLoadError::JsonError {
            file: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        info!("Loaded recommender config from {}", path.display());
        Ok(config)
    }

    pub fn with_vectorizer(mut self, vectorizer: VectorizerConfig) -> Self {
        self.vectorizer = vectorizer;
        self
    }

    pub fn with_seed_limit(mut self, seed_limit: usize) -> Self {
        self.seed_limit = seed_limit;
        self
    }

    pub fn with_history_policy(mut self, policy: HistoryPolicy) -> Self {
        self.history_policy = policy;
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    /// Reject values no recommender could work with
    pub fn validate(&self) -> RecommendResult<()> {
        self.vectorizer.validate()?;
        if let HistoryPolicy::Threshold { min_rating } = self.history_policy {
            StarRating::new(min_rating).map_err(|_| {
                RecommendError::InvalidInput(format!(
                    "history threshold must be between {} and {}, got {}",
                    StarRating::MIN,
                    StarRating::MAX,
                    min_rating
                ))
            })?;
        }
        if !self.min_score.is_finite() {
            return Err(RecommendError::InvalidInput(
                "min_score must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RecommenderConfig::default();
        assert_eq!(config.seed_limit, 5);
        assert_eq!(config.history_policy, HistoryPolicy::Threshold { min_rating: 4 });
        assert_eq!(config.min_score, 0.0);
        assert_eq!(config.vectorizer.max_features, Some(1000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let config: RecommenderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RecommenderConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config: RecommenderConfig = serde_json::from_str(
            r#"{
                "seed_limit": 10,
                "history_policy": { "kind": "priority_bucket" },
                "vectorizer": { "max_df": 1.0 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.seed_limit, 10);
        assert_eq!(config.history_policy, HistoryPolicy::PriorityBucket);
        assert_eq!(config.vectorizer.max_df, 1.0);
        assert_eq!(config.vectorizer.min_df, 0.01);
    }

    #[test]
    fn test_threshold_out_of_range() {
        let config = RecommenderConfig::default()
            .with_history_policy(HistoryPolicy::Threshold { min_rating: 6 });
        assert!(matches!(config.validate(), Err(RecommendError::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_vectorizer_rejected() {
        let config = RecommenderConfig::default()
            .with_vectorizer(VectorizerConfig::default().with_min_df(0.95));
        assert!(matches!(config.validate(), Err(RecommendError::InvalidInput(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = RecommenderConfig::from_file(Path::new("/nonexistent/cinematch.json"));
        assert!(matches!(
            result,
            Err(RecommendError::Load(DataLoadError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join("cinematch_engine_config_test.json");
        std::fs::write(&path, r#"{ "min_score": 0.2 }"#).unwrap();
        let config = RecommenderConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.min_score, 0.2);
        assert_eq!(config.seed_limit, 5);
    }
}
