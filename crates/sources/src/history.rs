//! History Source - candidates expanded from a user's ratings
//!
//! ## Algorithm
//! 1. Pick seed movies from the user's ratings according to the policy
//!    - `Threshold`: seeds rated >= min_rating, in voting order
//!    - `PriorityBucket`: every rated movie, 5 stars first down to 1
//! 2. For each seed, walk its full similarity row (combined-text matrix)
//!    and weight each similarity by the seed's rating
//! 3. Skip anything the user already rated
//! 4. Deduplicate, keeping the highest weighted score (ties keep the
//!    earlier seed)
//! 5. Rank and truncate
//!
//! Seeds are processed in parallel; partial results are merged in seed
//! order so the tie rule holds.

use crate::types::{rank_candidates, Candidate, CandidateSource, HistoryPolicy, UserContext};
use data_loader::{MovieIdx, StarRating};
use rayon::prelude::*;
use similarity::SimilarityMatrix;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Weight applied to a seed's similarities under `PriorityBucket`
pub fn bucket_weight(rating: StarRating) -> f64 {
    match rating.value() {
        5 => 1.0,
        4 => 0.8,
        3 => 0.6,
        2 => 0.4,
        _ => 0.2,
    }
}

/// Insert `candidate` unless an entry with an equal or better score exists
fn keep_best(best: &mut HashMap<MovieIdx, Candidate>, candidate: Candidate) {
    best.entry(candidate.movie)
        .and_modify(|existing| {
            if candidate.score > existing.score {
                *existing = candidate.clone();
            }
        })
        .or_insert(candidate);
}

/// History source: content-based expansion of a rating list
#[derive(Debug, Clone)]
pub struct HistorySource {
    /// Shared, read-only similarity matrix (synopsis + director + genre)
    matrix: Arc<SimilarityMatrix>,
    policy: HistoryPolicy,
}

impl HistorySource {
    pub fn new(matrix: Arc<SimilarityMatrix>) -> Self {
        Self {
            matrix,
            policy: HistoryPolicy::default(),
        }
    }

    /// Configure the weighting policy (default: threshold at 4 stars)
    pub fn with_policy(mut self, policy: HistoryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> HistoryPolicy {
        self.policy
    }

    /// Seeds with their weights, in processing order
    fn select_seeds(&self, user_context: &UserContext) -> Vec<(MovieIdx, StarRating, f64)> {
        match self.policy {
            HistoryPolicy::Threshold { min_rating } => user_context
                .ratings
                .iter()
                .filter(|(_, rating)| rating.value() >= min_rating)
                .map(|&(movie, rating)| (movie, rating, rating.fraction()))
                .collect(),
            HistoryPolicy::PriorityBucket => {
                let mut seeds: Vec<(MovieIdx, StarRating, f64)> = user_context
                    .ratings
                    .iter()
                    .map(|&(movie, rating)| (movie, rating, bucket_weight(rating)))
                    .collect();
                // Stable: voting order is kept inside each bucket
                seeds.sort_by(|a, b| b.1.cmp(&a.1));
                seeds
            }
        }
    }

    /// Weighted candidates from one seed
    fn expand_seed(
        &self,
        user_context: &UserContext,
        seed: MovieIdx,
        rating: StarRating,
        weight: f64,
    ) -> HashMap<MovieIdx, Candidate> {
        let mut best = HashMap::new();
        let Some(row) = self.matrix.row(seed) else {
            return best;
        };

        for (movie, &similarity) in row.iter().enumerate() {
            if movie == seed || user_context.rated_movies.contains(&movie) {
                continue;
            }
            let mut candidate =
                Candidate::new(movie, CandidateSource::History, similarity * weight);
            candidate.metadata.raw_similarity = similarity;
            candidate.metadata.seed_movie = Some(seed);
            candidate.metadata.seed_rating = Some(rating);
            keep_best(&mut best, candidate);
        }
        best
    }

    /// Generate up to `limit` candidates for the user
    #[instrument(skip(self, user_context), fields(username = %user_context.username))]
    pub fn get_candidates(&self, user_context: &UserContext, limit: usize) -> Vec<Candidate> {
        let seeds = self.select_seeds(user_context);
        debug!(
            "Expanding {} of {} rated movies with {:?}",
            seeds.len(),
            user_context.ratings.len(),
            self.policy
        );
        if seeds.is_empty() {
            return Vec::new();
        }

        let best = seeds
            .par_iter()
            .map(|&(seed, rating, weight)| self.expand_seed(user_context, seed, rating, weight))
            .reduce(HashMap::new, |mut acc, later| {
                for candidate in later.into_values() {
                    keep_best(&mut acc, candidate);
                }
                acc
            });

        let mut candidates: Vec<Candidate> = best.into_values().collect();
        rank_candidates(&mut candidates);
        candidates.truncate(limit);

        debug!("Generated {} history candidates", candidates.len());
        candidates
    }
}
