//! Shared types for candidate generation.

use data_loader::{MovieIdx, StarRating};
use serde::Deserialize;
use std::collections::HashSet;

/// Which recommendation mode produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    /// Similar to a single seed movie
    Seed,
    /// Expanded from the user's rating history
    History,
}

/// Extra information used for explanations
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateMetadata {
    /// Cosine similarity before any rating weight was applied
    pub raw_similarity: f64,
    /// The movie this candidate was found from
    pub seed_movie: Option<MovieIdx>,
    /// The user's rating of `seed_movie`, for history candidates
    pub seed_rating: Option<StarRating>,
}

/// A movie proposed for recommendation together with its ranking score
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub movie: MovieIdx,
    pub source: CandidateSource,
    pub score: f64,
    pub metadata: CandidateMetadata,
}

impl Candidate {
    pub fn new(movie: MovieIdx, source: CandidateSource, score: f64) -> Self {
        Self {
            movie,
            source,
            score,
            metadata: CandidateMetadata {
                raw_similarity: score,
                seed_movie: None,
                seed_rating: None,
            },
        }
    }
}

/// Sort by score descending, ties by catalog position.
///
/// Equivalent to a stable descending sort over catalog order.
pub fn rank_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.movie.cmp(&b.movie))
    });
}

/// How a user's rating history is turned into candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistoryPolicy {
    /// Only seeds rated at least `min_rating`; score = similarity x rating/5
    Threshold {
        #[serde(default = "default_min_rating")]
        min_rating: u8,
    },
    /// Every rated movie is a seed, processed from 5 stars down to 1;
    /// score = similarity x bucket weight
    PriorityBucket,
}

fn default_min_rating() -> u8 {
    4
}

impl Default for HistoryPolicy {
    fn default() -> Self {
        HistoryPolicy::Threshold {
            min_rating: default_min_rating(),
        }
    }
}

/// Everything candidate generation needs to know about one user
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    pub username: String,
    /// Catalog positions of every rated movie
    pub rated_movies: HashSet<MovieIdx>,
    /// Ratings resolved to catalog positions, in voting order
    pub ratings: Vec<(MovieIdx, StarRating)>,
    /// Rated titles that are not in the catalog
    pub unknown_titles: Vec<String>,
}

impl UserContext {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Context for requests that aren't tied to a user (seed mode)
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn add_rating(&mut self, movie: MovieIdx, rating: StarRating) {
        self.rated_movies.insert(movie);
        self.ratings.push((movie, rating));
    }
}
