//! Filter to enforce a score floor.
//!
//! With the default floor of 0.0 nothing is removed, so movies with an
//! empty synopsis (similarity 0) stay eligible. A positive floor drops
//! them together with any other weak match.

use crate::traits::Filter;
use anyhow::{bail, Result};
use sources::{Candidate, UserContext};

/// Removes candidates whose score is below `min_score`.
pub struct MinimumScoreFilter {
    min_score: f64,
}

impl MinimumScoreFilter {
    /// Create a new MinimumScoreFilter.
    ///
    /// # Arguments
    /// * `min_score` - Lowest score kept (inclusive)
    pub fn new(min_score: f64) -> Self {
        Self { min_score }
    }
}

impl Default for MinimumScoreFilter {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Filter for MinimumScoreFilter {
    fn name(&self) -> &str {
        "MinimumScoreFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        if self.min_score.is_nan() {
            bail!("minimum score is NaN");
        }

        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| candidate.score >= self.min_score)
            .collect();

        Ok(filtered)
    }
}
