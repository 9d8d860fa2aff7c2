//! # Data Loader Crate
//!
//! Loads the movie catalog and the user snapshot, and owns the in-memory
//! stores the recommender reads from.
//!
//! ## Main Components
//!
//! - **types**: Domain types (MovieRecord, StarRating, UserRecord, Catalog)
//! - **parser**: JSON readers/writers for catalog and users files
//! - **index**: Catalog building and validation
//! - **store**: User registry and rating store
//! - **traits**: `CatalogStore` / `RatingStore` interfaces for injection,
//!   plus title search and random browsing over any catalog
//! - **error**: Error types for loading and store operations
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{Catalog, RatingStore, StarRating, UserStore};
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("data/movies.json"))?;
//! let users = UserStore::load_from_file(Path::new("data/users.json"))?;
//!
//! users.register("ana", "secret")?;
//! users.record_rating("ana", "Heat", StarRating::new(5)?)?;
//! println!("{} movies, {} users", catalog.len(), users.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod store;
pub mod traits;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result, StoreError};
pub use store::UserStore;
pub use traits::{CatalogStore, RatingStore};
pub use types::{
    // Type aliases
    MovieIdx,
    UserId,
    // Core types
    Catalog,
    MovieRecord,
    StarRating,
    UserRating,
    UserRecord,
};
