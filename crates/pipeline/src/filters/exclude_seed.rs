//! Filter that drops the seed movie from its own "more like this" list.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::MovieIdx;
use sources::{Candidate, UserContext};

pub struct ExcludeSeedFilter {
    seed: MovieIdx,
}

impl ExcludeSeedFilter {
    pub fn new(seed: MovieIdx) -> Self {
        Self { seed }
    }
}

impl Filter for ExcludeSeedFilter {
    fn name(&self) -> &str {
        "ExcludeSeedFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .filter(|candidate| candidate.movie != self.seed)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sources::CandidateSource;

    #[test]
    fn test_exclude_seed_filter() {
        let candidates = vec![
            Candidate::new(3, CandidateSource::Seed, 1.0),
            Candidate::new(1, CandidateSource::Seed, 0.4),
            Candidate::new(2, CandidateSource::Seed, 0.1),
        ];

        let filtered = ExcludeSeedFilter::new(3)
            .apply(candidates, &UserContext::anonymous())
            .unwrap();

        let movies: Vec<MovieIdx> = filtered.iter().map(|c| c.movie).collect();
        assert_eq!(movies, vec![1, 2]);
    }
}
