//! Core domain types for the movie catalog and its users.
//!
//! - Type aliases keep catalog positions and user ids apart
//! - `MovieRecord` is immutable once loaded
//! - `StarRating` guarantees the 1-5 range by construction
//! - `Catalog` owns the records and the title lookup table

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Position of a movie in catalog order. Rows of every vector space and
/// similarity matrix use the same numbering.
pub type MovieIdx = usize;

/// Unique identifier for a registered user
pub type UserId = u32;

// =============================================================================
// Movie-related Types
// =============================================================================

/// A single catalog entry.
///
/// Text fields that are missing from the source file deserialize as empty
/// strings, so downstream code never has to deal with `Option<String>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub synopsis: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub poster_url: String,
}

impl MovieRecord {
    /// Minimal record, mostly useful for fixtures
    pub fn new(title: impl Into<String>, synopsis: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: None,
            synopsis: synopsis.into(),
            director: String::new(),
            genre: String::new(),
            poster_url: String::new(),
        }
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = director.into();
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn with_poster_url(mut self, url: impl Into<String>) -> Self {
        self.poster_url = url.into();
        self
    }

    /// Synopsis, director and genre joined by single spaces.
    ///
    /// Empty fields still contribute their separator, e.g. `"plot  Drama"`.
    pub fn combined_text(&self) -> String {
        format!("{} {} {}", self.synopsis, self.director, self.genre)
    }
}

// =============================================================================
// Rating Types
// =============================================================================

/// A star rating in the closed range 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StarRating(u8);

impl StarRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, StoreError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(StoreError::InvalidInput(format!(
                "rating must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Rating scaled into (0, 1]: 5 stars -> 1.0, 1 star -> 0.2
    pub fn fraction(self) -> f64 {
        f64::from(self.0) / f64::from(Self::MAX)
    }
}

impl TryFrom<u8> for StarRating {
    type Error = StoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StarRating> for u8 {
    fn from(rating: StarRating) -> Self {
        rating.0
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// One vote cast by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRating {
    pub title: String,
    pub rating: StarRating,
}

// =============================================================================
// User Types
// =============================================================================

/// A registered user and their votes in insertion order.
///
/// Passwords are kept as given; credential handling is deliberately minimal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub ratings: Vec<UserRating>,
}

impl UserRecord {
    pub fn new(id: UserId, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            password: password.into(),
            ratings: Vec::new(),
        }
    }

    /// Overwrite the vote for `title` if present, otherwise append it.
    pub fn upsert_rating(&mut self, title: &str, rating: StarRating) {
        match self.ratings.iter_mut().find(|r| r.title == title) {
            Some(existing) => existing.rating = rating,
            None => self.ratings.push(UserRating {
                title: title.to_string(),
                rating,
            }),
        }
    }
}

// =============================================================================
// Catalog - the in-memory movie table
// =============================================================================

/// Ordered movie table plus a title index.
///
/// Built once at startup (see `index.rs`) and read-only afterwards.
#[derive(Debug, Default)]
pub struct Catalog {
    pub(crate) movies: Vec<MovieRecord>,
    pub(crate) title_index: HashMap<String, MovieIdx>,
}

impl Catalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn get_movie(&self, idx: MovieIdx) -> Option<&MovieRecord> {
        self.movies.get(idx)
    }

    /// Exact-title lookup
    pub fn index_of(&self, title: &str) -> Option<MovieIdx> {
        self.title_index.get(title).copied()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
