//! Seed Source - movies similar to one given movie
//!
//! ## Algorithm
//! 1. Read the seed's row of the similarity matrix
//! 2. Drop the seed itself
//! 3. Rank by similarity (ties: catalog order)
//! 4. Return the top `limit`

use crate::types::{rank_candidates, Candidate, CandidateSource};
use data_loader::MovieIdx;
use similarity::SimilarityMatrix;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Candidates from a single seed movie
#[derive(Debug, Clone)]
pub struct SeedSource {
    /// Shared, read-only similarity matrix (synopsis based)
    matrix: Arc<SimilarityMatrix>,
}

impl SeedSource {
    pub fn new(matrix: Arc<SimilarityMatrix>) -> Self {
        Self { matrix }
    }

    /// Generate up to `limit` candidates similar to `seed`.
    ///
    /// Returns an empty list when `seed` is outside the matrix.
    #[instrument(skip(self))]
    pub fn get_candidates(&self, seed: MovieIdx, limit: usize) -> Vec<Candidate> {
        let Some(row) = self.matrix.row(seed) else {
            debug!("Seed {} is outside the similarity matrix", seed);
            return Vec::new();
        };

        let mut candidates: Vec<Candidate> = row
            .iter()
            .enumerate()
            .filter(|&(movie, _)| movie != seed)
            .map(|(movie, &similarity)| {
                let mut candidate = Candidate::new(movie, CandidateSource::Seed, similarity);
                candidate.metadata.seed_movie = Some(seed);
                candidate
            })
            .collect();

        rank_candidates(&mut candidates);
        candidates.truncate(limit);

        debug!("Generated {} seed candidates", candidates.len());
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similarity::{TfidfVectorizer, VectorizerConfig};

    fn matrix(docs: &[&str]) -> Arc<SimilarityMatrix> {
        let config = VectorizerConfig::default().with_max_df(1.0).with_min_df(0.0);
        let space = TfidfVectorizer::new()
            .with_config(config)
            .fit_transform(docs)
            .unwrap();
        Arc::new(SimilarityMatrix::from_vector_space(&space))
    }

    #[test]
    fn test_excludes_seed_and_ranks() {
        let source = SeedSource::new(matrix(&[
            "space war robots",
            "romantic comedy",
            "space battle robots",
        ]));

        let candidates = source.get_candidates(0, 5);
        let movies: Vec<MovieIdx> = candidates.iter().map(|c| c.movie).collect();
        assert_eq!(movies, vec![2, 1]);
        assert!(candidates.iter().all(|c| c.metadata.seed_movie == Some(0)));
    }

    #[test]
    fn test_limit_and_zero_ties() {
        let source = SeedSource::new(matrix(&[
            "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta",
        ]));

        // Everything scores 0, so catalog order decides
        let candidates = source.get_candidates(3, 5);
        let movies: Vec<MovieIdx> = candidates.iter().map(|c| c.movie).collect();
        assert_eq!(movies, vec![0, 1, 2, 4, 5]);
    }

    #[test]
    fn test_unknown_seed() {
        let source = SeedSource::new(matrix(&["alpha", "beta"]));
        assert!(source.get_candidates(9, 5).is_empty());
    }
}
