//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, UserContext};

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(ExcludeSeedFilter::new(seed))
///     .add_filter(MinimumScoreFilter::new(0.0));
///
/// let filtered = pipeline.apply(candidates, &UserContext::anonymous())?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// Stops at the first filter that fails.
    pub fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, context)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }

    /// Names of the configured filters, in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl std::fmt::Debug for FilterPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterPipeline")
            .field("filters", &self.filter_names())
            .finish()
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{AlreadyRatedFilter, ExcludeSeedFilter, MinimumScoreFilter};
    use data_loader::StarRating;
    use sources::CandidateSource;

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let context = UserContext::new("ana");

        let candidates = vec![
            Candidate::new(1, CandidateSource::Seed, 0.9),
            Candidate::new(2, CandidateSource::Seed, 0.8),
        ];

        let filtered = pipeline.apply(candidates.clone(), &context).unwrap();
        assert_eq!(filtered, candidates);
        assert!(pipeline.is_empty());
    }

    #[test]
    fn test_single_filter() {
        let mut context = UserContext::new("ana");
        context.add_rating(1, StarRating::new(4).unwrap());

        let pipeline = FilterPipeline::new().add_filter(AlreadyRatedFilter);

        let candidates = vec![
            Candidate::new(1, CandidateSource::History, 0.9),
            Candidate::new(2, CandidateSource::History, 0.8),
        ];

        let filtered = pipeline.apply(candidates, &context).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].movie, 2);
    }

    #[test]
    fn test_filters_run_in_order() {
        let pipeline = FilterPipeline::new()
            .add_filter(ExcludeSeedFilter::new(0))
            .add_filter(MinimumScoreFilter::new(0.5));
        assert_eq!(pipeline.filter_names(), vec!["ExcludeSeedFilter", "MinimumScoreFilter"]);
        assert_eq!(pipeline.len(), 2);

        let candidates = vec![
            Candidate::new(0, CandidateSource::Seed, 1.0),
            Candidate::new(4, CandidateSource::Seed, 0.7),
            Candidate::new(2, CandidateSource::Seed, 0.2),
        ];
        let filtered = pipeline.apply(candidates, &UserContext::anonymous()).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].movie, 4);
    }

    #[test]
    fn test_failing_filter_stops_pipeline() {
        let pipeline = FilterPipeline::new().add_filter(MinimumScoreFilter::new(f64::NAN));
        let candidates = vec![Candidate::new(1, CandidateSource::Seed, 0.4)];
        assert!(pipeline.apply(candidates, &UserContext::anonymous()).is_err());
    }
}
