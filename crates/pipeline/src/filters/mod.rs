//! Filter implementations for the candidate pipeline.

pub mod already_rated;
pub mod exclude_seed;
pub mod minimum_score;

// Re-export for convenience
pub use already_rated::AlreadyRatedFilter;
pub use exclude_seed::ExcludeSeedFilter;
pub use minimum_score::MinimumScoreFilter;
