//! TF-IDF vectorization.
//!
//! ## Algorithm
//! 1. Tokenize every document (in parallel, order preserved)
//! 2. Count document frequency `df(t)` and corpus term frequency per term
//! 3. Keep terms with `min_df <= df(t)/N <= max_df`
//! 4. Cap to the `max_features` most frequent terms (ties: lexical order)
//! 5. Columns are the surviving terms in lexical order
//! 6. Weight `tf(t, d) * idf(t)` with `idf(t) = ln((1 + N) / (1 + df(t))) + 1`
//! 7. L2-normalize each row
//!
//! Every intermediate map is a `BTreeMap`, so the same corpus always yields
//! the same vocabulary and bit-identical weights.

use crate::error::{Result, VectorizeError};
use crate::stopwords::StopWords;
use crate::tokenize::tokenize;
use rayon::prelude::*;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

/// Vocabulary thresholds
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Drop terms present in more than this fraction of documents
    pub max_df: f64,
    /// Drop terms present in fewer than this fraction of documents
    pub min_df: f64,
    /// Keep at most this many terms; `None` keeps all
    pub max_features: Option<usize>,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_df: 0.9,
            min_df: 0.01,
            max_features: Some(1000),
        }
    }
}

impl VectorizerConfig {
    pub fn with_max_df(mut self, max_df: f64) -> Self {
        self.max_df = max_df;
        self
    }

    pub fn with_min_df(mut self, min_df: f64) -> Self {
        self.min_df = min_df;
        self
    }

    pub fn with_max_features(mut self, max_features: Option<usize>) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(self.max_df) || !in_unit(self.min_df) {
            return Err(VectorizeError::InvalidConfig(format!(
                "min_df ({}) and max_df ({}) must lie in [0, 1]",
                self.min_df, self.max_df
            )));
        }
        if self.min_df > self.max_df {
            return Err(VectorizeError::InvalidConfig(format!(
                "min_df ({}) exceeds max_df ({})",
                self.min_df, self.max_df
            )));
        }
        if self.max_features == Some(0) {
            return Err(VectorizeError::InvalidConfig(
                "max_features must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// One sparse document vector; `indices` are strictly increasing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseRow {
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
}

impl SparseRow {
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Dot product by merging the two sorted index lists
    pub fn dot(&self, other: &SparseRow) -> f64 {
        let (mut a, mut b) = (0, 0);
        let mut sum = 0.0;
        while a < self.indices.len() && b < other.indices.len() {
            match self.indices[a].cmp(&other.indices[b]) {
                std::cmp::Ordering::Less => a += 1,
                std::cmp::Ordering::Greater => b += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[a] * other.values[b];
                    a += 1;
                    b += 1;
                }
            }
        }
        sum
    }

    pub fn get(&self, column: usize) -> f64 {
        self.indices
            .binary_search(&column)
            .map(|pos| self.values[pos])
            .unwrap_or(0.0)
    }
}

/// Vocabulary plus the document-term weight matrix, one row per document
#[derive(Debug, Clone, PartialEq)]
pub struct VectorSpace {
    vocabulary: Vec<String>,
    idf: Vec<f64>,
    rows: Vec<SparseRow>,
}

impl VectorSpace {
    /// Space with `n_documents` all-zero rows and no columns
    pub fn empty(n_documents: usize) -> Self {
        Self {
            vocabulary: Vec::new(),
            idf: Vec::new(),
            rows: vec![SparseRow::default(); n_documents],
        }
    }

    pub fn n_documents(&self) -> usize {
        self.rows.len()
    }

    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// True when there are no columns
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn rows(&self) -> &[SparseRow] {
        &self.rows
    }

    pub fn row(&self, doc: usize) -> Option<&SparseRow> {
        self.rows.get(doc)
    }

    pub fn column_of(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|t| t.as_str().cmp(term))
            .ok()
    }

    /// Weight of `term` in document `doc`, 0 when absent
    pub fn weight(&self, doc: usize, term: &str) -> f64 {
        match (self.row(doc), self.column_of(term)) {
            (Some(row), Some(col)) => row.get(col),
            _ => 0.0,
        }
    }
}

/// Learns a vocabulary from a corpus and weights it with TF-IDF
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    config: VectorizerConfig,
    stop_words: StopWords,
}

impl TfidfVectorizer {
    /// Default thresholds with English stop words
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: VectorizerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    /// Fit the vocabulary on `documents` and return their weight matrix.
    ///
    /// Fails with `EmptyCorpus` when no term survives filtering.
    #[instrument(skip_all, fields(documents = documents.len()))]
    pub fn fit_transform<S: AsRef<str> + Sync>(&self, documents: &[S]) -> Result<VectorSpace> {
        self.config.validate()?;
        let n_docs = documents.len();
        if n_docs == 0 {
            return Err(VectorizeError::EmptyCorpus { documents: 0 });
        }

        // Per-document term counts
        let doc_counts: Vec<BTreeMap<String, usize>> = documents
            .par_iter()
            .map(|doc| {
                let mut counts = BTreeMap::new();
                for token in tokenize(doc.as_ref(), &self.stop_words) {
                    *counts.entry(token).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        // Document frequency and corpus-wide term frequency
        let mut stats: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for counts in &doc_counts {
            for (term, &count) in counts {
                let entry = stats.entry(term.as_str()).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += count;
            }
        }

        let vocabulary = self.select_vocabulary(&stats, n_docs);
        debug!(
            "Kept {} of {} distinct terms",
            vocabulary.len(),
            stats.len()
        );
        if vocabulary.is_empty() {
            return Err(VectorizeError::EmptyCorpus { documents: n_docs });
        }

        let columns: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(col, term)| (term.as_str(), col))
            .collect();

        let n = n_docs as f64;
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = stats.get(term.as_str()).map_or(0, |s| s.0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        // Counts iterate in lexical order, which is also column order
        let rows: Vec<SparseRow> = doc_counts
            .par_iter()
            .map(|counts| {
                let mut row = SparseRow::default();
                for (term, &count) in counts {
                    if let Some(&col) = columns.get(term.as_str()) {
                        row.indices.push(col);
                        row.values.push(count as f64 * idf[col]);
                    }
                }
                let norm = row.norm();
                if norm > 0.0 {
                    row.values.iter_mut().for_each(|v| *v /= norm);
                }
                row
            })
            .collect();

        Ok(VectorSpace {
            vocabulary,
            idf,
            rows,
        })
    }

    /// Apply the df window and the feature cap; result is lexically sorted
    fn select_vocabulary(&self, stats: &BTreeMap<&str, (usize, usize)>, n_docs: usize) -> Vec<String> {
        let n = n_docs as f64;
        let max_count = self.config.max_df * n;
        let min_count = self.config.min_df * n;

        let mut kept: Vec<(&str, usize)> = stats
            .iter()
            .filter(|(_, (df, _))| {
                let df = *df as f64;
                df <= max_count && df >= min_count
            })
            .map(|(term, (_, tf))| (*term, *tf))
            .collect();

        if let Some(max_features) = self.config.max_features {
            kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            kept.truncate(max_features);
        }

        let mut vocabulary: Vec<String> = kept.into_iter().map(|(t, _)| t.to_string()).collect();
        vocabulary.sort();
        vocabulary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_df_limits() -> VectorizerConfig {
        VectorizerConfig::default().with_max_df(1.0).with_min_df(0.0)
    }

    #[test]
    fn test_shape_and_vocabulary_order() {
        let docs = ["space war robots", "space battle robots", "romantic comedy"];
        let space = TfidfVectorizer::new().fit_transform(&docs).unwrap();

        assert_eq!(space.n_documents(), 3);
        assert_eq!(
            space.vocabulary(),
            &["battle", "comedy", "robots", "romantic", "space", "war"]
        );
        for row in space.rows() {
            assert!(row.indices.windows(2).all(|w| w[0] < w[1]));
            assert!(row.indices.iter().all(|&c| c < space.n_features()));
        }
    }

    #[test]
    fn test_smoothed_idf_values() {
        let docs = ["space war", "space battle", "comedy"];
        let space = TfidfVectorizer::new()
            .with_config(no_df_limits())
            .fit_transform(&docs)
            .unwrap();

        let space_col = space.column_of("space").unwrap();
        let war_col = space.column_of("war").unwrap();
        assert!((space.idf()[space_col] - ((4.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
        assert!((space.idf()[war_col] - (2.0f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let docs = ["alpha beta beta", "beta gamma", ""];
        let space = TfidfVectorizer::new()
            .with_config(no_df_limits())
            .fit_transform(&docs)
            .unwrap();

        assert!((space.rows()[0].norm() - 1.0).abs() < 1e-12);
        assert!((space.rows()[1].norm() - 1.0).abs() < 1e-12);
        // Empty document stays an all-zero row
        assert_eq!(space.rows()[2].nnz(), 0);
    }

    #[test]
    fn test_term_frequency_scales_weight() {
        let docs = ["alpha beta beta", "alpha gamma"];
        let space = TfidfVectorizer::new()
            .with_config(no_df_limits())
            .fit_transform(&docs)
            .unwrap();
        assert!(space.weight(0, "beta") > space.weight(0, "alpha"));
        assert_eq!(space.weight(1, "beta"), 0.0);
    }

    #[test]
    fn test_max_df_drops_universal_terms() {
        let docs = ["movie space", "movie war", "movie comedy"];
        let space = TfidfVectorizer::new().fit_transform(&docs).unwrap();
        assert!(space.column_of("movie").is_none());
        assert!(space.column_of("space").is_some());
    }

    #[test]
    fn test_min_df_drops_rare_terms() {
        let docs = ["rare common", "common", "common beta", "beta"];
        let config = VectorizerConfig::default().with_max_df(1.0).with_min_df(0.5);
        let space = TfidfVectorizer::new()
            .with_config(config)
            .fit_transform(&docs)
            .unwrap();
        assert_eq!(space.vocabulary(), &["beta", "common"]);
    }

    #[test]
    fn test_max_features_ties_break_lexically() {
        // zeta appears 3 times; alpha, beta, gamma twice each
        let docs = ["zeta zeta zeta", "gamma gamma", "beta beta", "alpha alpha"];
        let config = no_df_limits().with_max_features(Some(3));
        let space = TfidfVectorizer::new()
            .with_config(config)
            .fit_transform(&docs)
            .unwrap();
        assert_eq!(space.vocabulary(), &["alpha", "beta", "zeta"]);
    }

    #[test]
    fn test_deterministic() {
        let docs = [
            "a crew answers a distress call",
            "marines return to the colony",
            "a heist goes wrong in los angeles",
            "the crew fights a creature",
        ];
        let vectorizer = TfidfVectorizer::new();
        let first = vectorizer.fit_transform(&docs).unwrap();
        let second = vectorizer.fit_transform(&docs).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_corpus() {
        let empty: [&str; 0] = [];
        assert_eq!(
            TfidfVectorizer::new().fit_transform(&empty),
            Err(VectorizeError::EmptyCorpus { documents: 0 })
        );

        let blank = ["", "the and of", ""];
        assert_eq!(
            TfidfVectorizer::new().fit_transform(&blank),
            Err(VectorizeError::EmptyCorpus { documents: 3 })
        );
    }

    #[test]
    fn test_invalid_config() {
        let config = VectorizerConfig::default().with_min_df(0.95);
        let result = TfidfVectorizer::new().with_config(config).fit_transform(&["x"]);
        assert!(matches!(result, Err(VectorizeError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_space() {
        let space = VectorSpace::empty(4);
        assert_eq!(space.n_documents(), 4);
        assert_eq!(space.n_features(), 0);
        assert!(space.is_empty());
        assert_eq!(space.weight(0, "anything"), 0.0);
    }
}
