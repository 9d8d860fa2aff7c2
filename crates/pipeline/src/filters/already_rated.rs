//! Filter to remove movies the user has already rated.
//!
//! A rated movie is never recommended back to the user who rated it.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, UserContext};

/// Removes candidates that the user has already rated.
///
/// Uses the HashSet in UserContext.rated_movies for O(1) lookups.
pub struct AlreadyRatedFilter;

impl Filter for AlreadyRatedFilter {
    fn name(&self) -> &str {
        "AlreadyRatedFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| !context.rated_movies.contains(&candidate.movie))
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::StarRating;
    use sources::CandidateSource;

    #[test]
    fn test_already_rated_filter() {
        let mut context = UserContext::new("ana");
        context.add_rating(10, StarRating::new(5).unwrap());
        context.add_rating(20, StarRating::new(1).unwrap());

        let candidates = vec![
            Candidate::new(10, CandidateSource::History, 0.9),
            Candidate::new(11, CandidateSource::History, 0.8),
            Candidate::new(20, CandidateSource::History, 0.7),
            Candidate::new(30, CandidateSource::History, 0.6),
        ];

        let filter = AlreadyRatedFilter;
        let filtered = filter.apply(candidates, &context).unwrap();

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].movie, 11);
        assert_eq!(filtered[1].movie, 30);
    }

    #[test]
    fn test_anonymous_context_keeps_everything() {
        let candidates = vec![
            Candidate::new(1, CandidateSource::Seed, 0.5),
            Candidate::new(2, CandidateSource::Seed, 0.4),
        ];
        let filtered = AlreadyRatedFilter
            .apply(candidates, &UserContext::anonymous())
            .unwrap();
        assert_eq!(filtered.len(), 2);
    }
}
