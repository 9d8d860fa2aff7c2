//! Engine crate for the cinematch recommender.
//!
//! [`Recommender`] ties the catalog, the rating store, both similarity
//! matrices and the candidate sources together behind one synchronous API.
//! [`load_stores`] reads the JSON files a caller usually starts from.

pub mod config;
pub mod error;
pub mod recommender;

use std::path::Path;
use std::sync::Arc;

use data_loader::{Catalog, UserStore};
use similarity::{SimilarityMatrix, VectorSpace, VectorizerConfig};

pub use config::RecommenderConfig;
pub use error::{RecommendError, RecommendResult};
pub use recommender::{Recommendation, Recommender};

/// TF-IDF vectors for `corpus`, one row per document.
///
/// Unlike [`Recommender::new`], an empty vocabulary is reported as
/// [`RecommendError::EmptyCorpus`].
pub fn vectorize<S: AsRef<str> + Sync>(
    corpus: &[S],
    config: &VectorizerConfig,
) -> RecommendResult<VectorSpace> {
    Ok(similarity::vectorize(corpus, config)?)
}

/// All-pairs cosine similarity of a vector space
pub fn build_similarity(space: &VectorSpace) -> SimilarityMatrix {
    similarity::build_similarity(space)
}

/// Load the catalog and the users snapshot.
///
/// A missing users file yields an empty store; a missing catalog is an error.
pub fn load_stores(
    catalog_path: &Path,
    users_path: &Path,
) -> RecommendResult<(Arc<Catalog>, Arc<UserStore>)> {
    let catalog = Catalog::load_from_file(catalog_path)?;
    let users = UserStore::load_from_file(users_path)?;
    Ok((Arc::new(catalog), Arc::new(users)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectorize_reports_empty_corpus() {
        let result = vectorize(&["the and of", ""], &VectorizerConfig::default());
        assert!(matches!(result, Err(RecommendError::EmptyCorpus { documents: 2 })));
    }

    #[test]
    fn test_vectorize_and_build() {
        let docs = ["space war robots", "space battle robots", "romantic comedy"];
        let space = vectorize(&docs, &VectorizerConfig::default()).unwrap();
        let matrix = build_similarity(&space);
        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix.get(0, 0), Some(1.0));
    }

    #[test]
    fn test_load_stores_missing_catalog() {
        let result = load_stores(
            Path::new("/nonexistent/movies.json"),
            Path::new("/nonexistent/users.json"),
        );
        assert!(matches!(result, Err(RecommendError::Load(_))));
    }
}
