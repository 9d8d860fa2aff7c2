//! Catalog building, validation and queries.
//!
//! - Build the title index from the ordered record list
//! - Reject blank and duplicate titles
//! - Produce the two text corpora used for vectorization

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::{info, instrument};

impl Catalog {
    /// Load the catalog from a JSON file.
    ///
    /// Steps:
    /// 1. Parse the movie array
    /// 2. Build the title index
    /// 3. Validate titles
    #[instrument]
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let movies = parser::parse_catalog(path)?;
        let catalog = Self::from_movies(movies)?;
        info!("Catalog loaded with {} movies", catalog.len());
        Ok(catalog)
    }

    /// Build a catalog from records already in memory, preserving order.
    pub fn from_movies(movies: Vec<MovieRecord>) -> Result<Self> {
        let mut catalog = Catalog {
            movies,
            ..Catalog::default()
        };
        catalog.build_title_index()?;
        Ok(catalog)
    }

    /// Map each title to its catalog position
    fn build_title_index(&mut self) -> Result<()> {
        self.title_index.clear();
        self.title_index.reserve(self.movies.len());

        for (idx, movie) in self.movies.iter().enumerate() {
            if movie.title.trim().is_empty() {
                return Err(DataLoadError::ValidationError(format!(
                    "movie at position {} has an empty title",
                    idx
                )));
            }
            if self.title_index.insert(movie.title.clone(), idx).is_some() {
                return Err(DataLoadError::DuplicateTitle(movie.title.clone()));
            }
        }
        Ok(())
    }

    /// One document per movie: the synopsis alone
    pub fn synopsis_corpus(&self) -> Vec<&str> {
        self.movies.iter().map(|m| m.synopsis.as_str()).collect()
    }

    /// One document per movie: synopsis, director and genre combined
    pub fn combined_corpus(&self) -> Vec<String> {
        self.movies.iter().map(MovieRecord::combined_text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::traits::CatalogStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn sample_catalog() -> Catalog {
        Catalog::from_movies(vec![
            MovieRecord::new("Alien", "crew meets creature").with_year(1979),
            MovieRecord::new("Aliens", "marines return").with_year(1986),
            MovieRecord::new("Heat", "heist in los angeles").with_genre("Crime"),
        ])
        .unwrap()
    }

    #[test]
    fn test_title_index() {
        let catalog = sample_catalog();
        assert_eq!(catalog.index_of("Aliens"), Some(1));
        assert_eq!(catalog.index_of("aliens"), None);
        assert_eq!(catalog.get_movie(2).unwrap().title, "Heat");
    }

    #[test]
    fn test_duplicate_title_rejected() {
        let result = Catalog::from_movies(vec![
            MovieRecord::new("Heat", ""),
            MovieRecord::new("Heat", "remake"),
        ]);
        assert!(matches!(result, Err(DataLoadError::DuplicateTitle(t)) if t == "Heat"));
    }

    #[test]
    fn test_blank_title_rejected() {
        let result = Catalog::from_movies(vec![MovieRecord::new("  ", "")]);
        assert!(matches!(result, Err(DataLoadError::ValidationError(_))));
    }

    #[test]
    fn test_corpora_follow_catalog_order() {
        let catalog = sample_catalog();
        assert_eq!(catalog.synopsis_corpus()[1], "marines return");
        assert_eq!(catalog.combined_corpus()[2], "heist in los angeles  Crime");
    }

    #[test]
    fn test_search_case_insensitive() {
        let catalog = sample_catalog();
        let hits: Vec<&str> = catalog
            .search("ALIEN")
            .unwrap()
            .iter()
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(hits, vec!["Alien", "Aliens"]);
        assert!(catalog.search("zzz").unwrap().is_empty());
    }

    #[test]
    fn test_search_empty_text() {
        let catalog = sample_catalog();
        assert!(matches!(catalog.search("   "), Err(StoreError::InvalidInput(_))));
    }

    #[test]
    fn test_random_movies_distinct() {
        let catalog = sample_catalog();
        let mut rng = StdRng::seed_from_u64(7);

        let picked = catalog.random_movies(2, &mut rng);
        assert_eq!(picked.len(), 2);
        let titles: HashSet<&str> = picked.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles.len(), 2);

        // Asking for more than exists returns the whole catalog
        assert_eq!(catalog.random_movies(10, &mut rng).len(), 3);
    }
}
