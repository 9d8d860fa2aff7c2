//! Filtering stage for movie candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//!
//! ## Architecture
//! Candidate sources already rank and truncate; the pipeline runs after them
//! and removes anything a recommendation must never contain:
//! 1. Movies the user has already rated
//! 2. The seed movie itself (seed mode)
//! 3. Candidates scoring below a configured floor
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::FilterPipeline;
//! use pipeline::filters::*;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(AlreadyRatedFilter)
//!     .add_filter(MinimumScoreFilter::new(0.05));
//!
//! let filtered = pipeline.apply(candidates, &context)?;
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
