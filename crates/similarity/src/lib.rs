//! # Similarity Crate
//!
//! Text vectorization and all-pairs document similarity.
//!
//! ## Components
//!
//! - **tokenize** / **stopwords**: lower-cased word tokens minus English stop words
//! - **vectorizer**: `TfidfVectorizer` producing a `VectorSpace`
//! - **matrix**: `SimilarityMatrix`, dense cosine similarity over a `VectorSpace`
//!
//! ## Example Usage
//!
//! ```ignore
//! use similarity::{build_similarity, vectorize, VectorizerConfig};
//!
//! let docs = ["space war robots", "space battle robots", "romantic comedy"];
//! let space = vectorize(&docs, &VectorizerConfig::default())?;
//! let matrix = build_similarity(&space);
//! assert!(matrix.get(0, 1) > matrix.get(0, 2));
//! ```

pub mod error;
pub mod matrix;
pub mod stopwords;
pub mod tokenize;
pub mod vectorizer;

pub use error::{Result, VectorizeError};
pub use matrix::SimilarityMatrix;
pub use stopwords::StopWords;
pub use vectorizer::{SparseRow, TfidfVectorizer, VectorSpace, VectorizerConfig};

/// Vectorize a corpus with English stop words and the given thresholds
pub fn vectorize<S: AsRef<str> + Sync>(corpus: &[S], config: &VectorizerConfig) -> Result<VectorSpace> {
    TfidfVectorizer::new()
        .with_config(config.clone())
        .fit_transform(corpus)
}

/// Cosine similarity of every pair of documents in `space`
pub fn build_similarity(space: &VectorSpace) -> SimilarityMatrix {
    SimilarityMatrix::from_vector_space(space)
}
