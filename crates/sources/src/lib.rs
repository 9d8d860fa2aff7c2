//! # Sources Crate
//!
//! Candidate generation for content-based movie recommendations.
//!
//! ## Components
//!
//! ### Seed Source
//! "More like this": the movies most similar to one seed movie, read from
//! the synopsis similarity matrix.
//!
//! ### History Source
//! Expands every qualifying movie in a user's rating history through the
//! combined (synopsis + director + genre) similarity matrix, weighting each
//! similarity by the user's rating. Two policies are available, see
//! [`HistoryPolicy`].
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{user_context::build_user_context, HistorySource, SeedSource};
//! use std::sync::Arc;
//!
//! let seed = SeedSource::new(Arc::clone(&synopsis_matrix));
//! let similar = seed.get_candidates(catalog.index_of("Heat").unwrap(), 5);
//!
//! let context = build_user_context(&catalog, &users, "ana")?;
//! let history = HistorySource::new(Arc::clone(&combined_matrix));
//! let personal = history.get_candidates(&context, 20);
//! ```

// Public modules
pub mod types;
pub mod user_context;
pub mod seed;
pub mod history;

// Re-export commonly used types
pub use types::{rank_candidates, Candidate, CandidateMetadata, CandidateSource, HistoryPolicy, UserContext};
pub use seed::SeedSource;
pub use history::HistorySource;

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Catalog, MovieRecord, RatingStore, StarRating, UserStore};
    use similarity::{SimilarityMatrix, TfidfVectorizer};
    use std::sync::Arc;

    #[test]
    fn test_sources_share_one_matrix() {
        let catalog = Catalog::from_movies(vec![
            MovieRecord::new("A", "space war robots"),
            MovieRecord::new("B", "space battle robots"),
            MovieRecord::new("C", "romantic comedy"),
        ])
        .unwrap();
        let space = TfidfVectorizer::new()
            .fit_transform(&catalog.synopsis_corpus())
            .unwrap();
        let matrix = Arc::new(SimilarityMatrix::from_vector_space(&space));

        let users = UserStore::new();
        users.register("ana", "pw").unwrap();
        users.record_rating("ana", "A", StarRating::new(5).unwrap()).unwrap();
        let context = user_context::build_user_context(&catalog, &users, "ana").unwrap();

        let seed = SeedSource::new(Arc::clone(&matrix)).get_candidates(0, 5);
        let history = HistorySource::new(Arc::clone(&matrix)).get_candidates(&context, 5);

        assert_eq!(seed[0].movie, 1);
        assert_eq!(history[0].movie, 1);
        assert_eq!(history[0].source, CandidateSource::History);
    }

    #[test]
    fn test_candidate_creation() {
        let candidate = Candidate::new(1, CandidateSource::Seed, 0.85);
        assert_eq!(candidate.movie, 1);
        assert_eq!(candidate.source, CandidateSource::Seed);
        assert_eq!(candidate.metadata.raw_similarity, 0.85);
    }
}
