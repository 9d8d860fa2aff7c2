//! Store interfaces injected into the recommender.
//!
//! The recommender never reaches for a global catalog or user table; it is
//! handed implementations of these traits at construction time.

use crate::error::StoreError;
use rand::RngCore;
use rand::seq::IndexedRandom;
use crate::types::{Catalog, MovieIdx, MovieRecord, StarRating, UserId, UserRating};

/// Read-only access to the movie catalog.
///
/// `Send + Sync` so one catalog can back several recommenders or threads.
pub trait CatalogStore: Send + Sync {
    /// All records in catalog order
    fn movies(&self) -> &[MovieRecord];

    /// Exact-title lookup
    fn index_of(&self, title: &str) -> Option<MovieIdx>;

    fn get_movie(&self, idx: MovieIdx) -> Option<&MovieRecord> {
        self.movies().get(idx)
    }

    fn len(&self) -> usize {
        self.movies().len()
    }

    fn is_empty(&self) -> bool {
        self.movies().is_empty()
    }

    /// Case-insensitive substring search over titles, in catalog order.
    fn search(&self, text: &str) -> Result<Vec<&MovieRecord>, StoreError> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Err(StoreError::InvalidInput(
                "search text must not be empty".to_string(),
            ));
        }

        Ok(self
            .movies()
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .collect())
    }

    /// Uniform sample of up to `count` distinct movies
    fn random_movies(&self, count: usize, rng: &mut dyn RngCore) -> Vec<&MovieRecord> {
        self.movies().choose_multiple(rng, count).collect()
    }
}

/// Per-user vote storage, together with the accounts that own the votes.
pub trait RatingStore: Send + Sync {
    /// Create an account with no ratings and return its id
    fn register(&self, username: &str, password: &str) -> Result<UserId, StoreError>;

    /// Plain credential match
    fn authenticate(&self, username: &str, password: &str) -> Result<(), StoreError>;

    /// Insert or overwrite the user's vote for `title`.
    ///
    /// Must leave the user's list untouched when it returns an error.
    fn record_rating(&self, username: &str, title: &str, rating: StarRating)
    -> Result<(), StoreError>;

    /// Votes in insertion order; empty for unknown users
    fn get_ratings(&self, username: &str) -> Vec<UserRating>;

    /// Fails only when the store itself is unusable
    fn contains_user(&self, username: &str) -> Result<bool, StoreError>;
}

impl CatalogStore for Catalog {
    fn movies(&self) -> &[MovieRecord] {
        Catalog::movies(self)
    }

    fn index_of(&self, title: &str) -> Option<MovieIdx> {
        Catalog::index_of(self, title)
    }
}
