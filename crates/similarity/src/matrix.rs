//! All-pairs cosine similarity.
//!
//! The upper triangle is computed in parallel and mirrored, so the matrix is
//! symmetric bit for bit.
//!
//! Zero vectors: a document whose row is all zeros (empty or fully filtered
//! text) has similarity 0 with every document, itself included. Every other
//! diagonal cell is exactly 1.0.

use crate::vectorizer::{SparseRow, VectorSpace};
use rayon::prelude::*;
use tracing::{info, instrument};

/// Dense, row-major N x N similarity matrix
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f64>,
}

/// Cosine of two sparse rows given precomputed norms; 0/0 is 0
fn cosine(a: &SparseRow, norm_a: f64, b: &SparseRow, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (a.dot(b) / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

impl SimilarityMatrix {
    /// Build the full matrix for every document in `space`.
    ///
    /// Cost is O(N^2 * nnz); there is no incremental update.
    #[instrument(skip_all, fields(documents = space.n_documents()))]
    pub fn from_vector_space(space: &VectorSpace) -> Self {
        let rows = space.rows();
        let n = rows.len();
        let norms: Vec<f64> = rows.iter().map(SparseRow::norm).collect();

        let upper: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                ((i + 1)..n)
                    .map(|j| cosine(&rows[i], norms[i], &rows[j], norms[j]))
                    .collect()
            })
            .collect();

        let mut data = vec![0.0; n * n];
        for (i, tail) in upper.into_iter().enumerate() {
            data[i * n + i] = if norms[i] > 0.0 { 1.0 } else { 0.0 };
            for (k, sim) in tail.into_iter().enumerate() {
                let j = i + 1 + k;
                data[i * n + j] = sim;
                data[j * n + i] = sim;
            }
        }

        info!("Built {}x{} similarity matrix", n, n);
        Self { n, data }
    }

    /// Number of documents (rows == columns)
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.n && j < self.n {
            Some(self.data[i * self.n + j])
        } else {
            None
        }
    }

    /// Similarities of document `i` to every document, in catalog order
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.n {
            Some(&self.data[i * self.n..(i + 1) * self.n])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::{TfidfVectorizer, VectorizerConfig};

    fn build(docs: &[&str]) -> SimilarityMatrix {
        let config = VectorizerConfig::default().with_max_df(1.0).with_min_df(0.0);
        let space = TfidfVectorizer::new()
            .with_config(config)
            .fit_transform(docs)
            .unwrap();
        SimilarityMatrix::from_vector_space(&space)
    }

    #[test]
    fn test_space_robots_example() {
        let m = build(&["space war robots", "space battle robots", "romantic comedy"]);
        let ab = m.get(0, 1).unwrap();
        let ac = m.get(0, 2).unwrap();
        assert!(ab > ac);
        assert!(ab > 0.0);
        assert_eq!(ac, 0.0);
    }

    #[test]
    fn test_symmetric_bounded_unit_diagonal() {
        let m = build(&[
            "crew answers distress call",
            "crew fights creature",
            "marines return colony creature",
            "heist goes wrong",
        ]);
        for i in 0..m.len() {
            assert_eq!(m.get(i, i), Some(1.0));
            for j in 0..m.len() {
                let v = m.get(i, j).unwrap();
                assert_eq!(v, m.get(j, i).unwrap());
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_zero_vector_row() {
        let m = build(&["crew fights creature", "", "creature feature"]);
        assert_eq!(m.get(1, 1), Some(0.0));
        assert_eq!(m.row(1).unwrap(), &[0.0, 0.0, 0.0]);
        assert_eq!(m.get(0, 0), Some(1.0));
    }

    #[test]
    fn test_empty_space_gives_zero_matrix() {
        let m = SimilarityMatrix::from_vector_space(&VectorSpace::empty(3));
        assert_eq!(m.len(), 3);
        assert!(m.row(2).unwrap().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_out_of_range() {
        let m = build(&["alpha", "beta"]);
        assert!(m.get(2, 0).is_none());
        assert!(m.row(5).is_none());
    }
}
