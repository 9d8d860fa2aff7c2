//! # Recommender
//!
//! Facade over the whole recommendation path:
//! 1. Vectorize the catalog twice (synopsis, combined text) and build both
//!    similarity matrices in parallel, once, at construction
//! 2. Mode A: seed title -> similar movies from the synopsis matrix
//! 3. Mode B: username -> rating history -> expanded candidates from the
//!    combined matrix
//! 4. Filter, then resolve indices back to titles with an explanation
//!
//! Stores are injected as trait objects; the recommender keeps no global
//! state and is cheap to clone across threads.

use std::sync::Arc;
use std::time::Instant;

use rand::RngCore;
use tracing::{debug, info, instrument, warn};

use data_loader::{
    CatalogStore, MovieIdx, MovieRecord, RatingStore, StarRating, StoreError, UserId, UserRating,
};
use pipeline::filters::{AlreadyRatedFilter, ExcludeSeedFilter, MinimumScoreFilter};
use pipeline::FilterPipeline;
use similarity::{SimilarityMatrix, VectorSpace, VectorizeError, VectorizerConfig};
use sources::{Candidate, CandidateSource, HistorySource, SeedSource, UserContext};

use crate::config::RecommenderConfig;
use crate::error::{RecommendError, RecommendResult};

/// One recommended movie, resolved to its title
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub year: Option<u16>,
    /// Ranking score (similarity, weighted by rating in history mode)
    pub score: f64,
    /// Cosine similarity to the seed before weighting
    pub raw_similarity: f64,
    pub source: CandidateSource,
    /// The movie this recommendation was derived from
    pub seed_title: Option<String>,
    /// The user's rating of `seed_title` (history mode)
    pub seed_rating: Option<StarRating>,
    pub explanation: String,
}

/// Content-based recommender over an injected catalog and rating store
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<dyn CatalogStore>,
    ratings: Arc<dyn RatingStore>,
    config: RecommenderConfig,
    synopsis_matrix: Arc<SimilarityMatrix>,
    combined_matrix: Arc<SimilarityMatrix>,
    seed_source: SeedSource,
    history_source: HistorySource,
    history_filters: Arc<FilterPipeline>,
}

impl Recommender {
    /// Build both similarity matrices and wire up the candidate sources.
    ///
    /// A corpus where no term survives vectorization is not fatal: the
    /// matrix is built from an empty vector space, so every similarity is 0.
    #[instrument(skip_all, fields(movies = catalog.len()))]
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        ratings: Arc<dyn RatingStore>,
        config: RecommenderConfig,
    ) -> RecommendResult<Self> {
        config.validate()?;
        let start_time = Instant::now();

        let synopsis_docs: Vec<&str> = catalog
            .movies()
            .iter()
            .map(|m| m.synopsis.as_str())
            .collect();
        let combined_docs: Vec<String> = catalog
            .movies()
            .iter()
            .map(MovieRecord::combined_text)
            .collect();

        let (synopsis_matrix, combined_matrix) = rayon::join(
            || build_matrix("synopsis", synopsis_docs.as_slice(), &config.vectorizer),
            || build_matrix("combined", combined_docs.as_slice(), &config.vectorizer),
        );
        let synopsis_matrix = Arc::new(synopsis_matrix?);
        let combined_matrix = Arc::new(combined_matrix?);

        let seed_source = SeedSource::new(Arc::clone(&synopsis_matrix));
        let history_source =
            HistorySource::new(Arc::clone(&combined_matrix)).with_policy(config.history_policy);
        let history_filters = Arc::new(
            FilterPipeline::new()
                .add_filter(AlreadyRatedFilter)
                .add_filter(MinimumScoreFilter::new(config.min_score)),
        );

        info!(
            "Recommender ready for {} movies in {:.2?}",
            catalog.len(),
            start_time.elapsed()
        );

        Ok(Self {
            catalog,
            ratings,
            config,
            synopsis_matrix,
            combined_matrix,
            seed_source,
            history_source,
            history_filters,
        })
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    pub fn catalog(&self) -> &dyn CatalogStore {
        self.catalog.as_ref()
    }

    /// Similarities between synopses (seed mode)
    pub fn synopsis_matrix(&self) -> &SimilarityMatrix {
        &self.synopsis_matrix
    }

    /// Similarities between synopsis + director + genre (history mode)
    pub fn combined_matrix(&self) -> &SimilarityMatrix {
        &self.combined_matrix
    }

    /// "More like this": the `seed_limit` movies closest to `title`
    #[instrument(skip(self))]
    pub fn recommend_by_seed(&self, title: &str) -> RecommendResult<Vec<Recommendation>> {
        let seed = self.index_of(title)?;

        let candidates = self.seed_source.get_candidates(seed, self.config.seed_limit);
        let filters = FilterPipeline::new()
            .add_filter(ExcludeSeedFilter::new(seed))
            .add_filter(MinimumScoreFilter::new(self.config.min_score));
        let filtered = self.apply_filters(&filters, candidates, &UserContext::anonymous())?;

        debug!("{} recommendations for '{}'", filtered.len(), title);
        Ok(self.to_recommendations(filtered))
    }

    /// Recommendations from a user's rating history.
    ///
    /// Never returns a movie the user has rated. An empty list means no
    /// rating qualified as a seed under the configured policy.
    #[instrument(skip(self))]
    pub fn recommend_by_user(
        &self,
        username: &str,
        limit: Option<usize>,
    ) -> RecommendResult<Vec<Recommendation>> {
        let start_time = Instant::now();

        let context = self.build_user_context(username)?;
        debug!(
            "User {} has {} usable ratings ({} unknown titles)",
            username,
            context.ratings.len(),
            context.unknown_titles.len()
        );

        let candidates = self
            .history_source
            .get_candidates(&context, limit.unwrap_or(usize::MAX));
        let filtered = self.apply_filters(&self.history_filters, candidates, &context)?;
        let recommendations = self.to_recommendations(filtered);

        info!(
            "Selected {} recommendations for user {} in {:.2?}",
            recommendations.len(),
            username,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Record (or overwrite) a vote; the title must be in the catalog
    #[instrument(skip(self))]
    pub fn record_rating(&self, username: &str, title: &str, rating: u8) -> RecommendResult<()> {
        let rating = StarRating::new(rating)?;
        self.index_of(title)?;
        self.ratings.record_rating(username, title, rating)?;
        Ok(())
    }

    /// The user's votes in insertion order (empty for unknown users)
    pub fn get_ratings(&self, username: &str) -> Vec<UserRating> {
        self.ratings.get_ratings(username)
    }

    pub fn register(&self, username: &str, password: &str) -> RecommendResult<UserId> {
        Ok(self.ratings.register(username, password)?)
    }

    pub fn authenticate(&self, username: &str, password: &str) -> RecommendResult<()> {
        Ok(self.ratings.authenticate(username, password)?)
    }

    /// Case-insensitive title search
    pub fn search(&self, text: &str) -> RecommendResult<Vec<&MovieRecord>> {
        Ok(self.catalog.search(text)?)
    }

    /// Full record for an exact title
    pub fn movie_details(&self, title: &str) -> RecommendResult<&MovieRecord> {
        let idx = self.index_of(title)?;
        self.catalog
            .get_movie(idx)
            .ok_or_else(|| RecommendError::Internal(format!("catalog index {} out of range", idx)))
    }

    /// Up to `count` distinct movies for browsing
    pub fn random_movies(&self, count: usize, rng: &mut dyn RngCore) -> Vec<&MovieRecord> {
        self.catalog.random_movies(count, rng)
    }

    fn index_of(&self, title: &str) -> RecommendResult<MovieIdx> {
        self.catalog
            .index_of(title)
            .ok_or_else(|| StoreError::movie_not_found(title).into())
    }

    fn build_user_context(&self, username: &str) -> RecommendResult<UserContext> {
        Ok(sources::user_context::build_user_context(
            self.catalog.as_ref(),
            self.ratings.as_ref(),
            username,
        )?)
    }

    fn apply_filters(
        &self,
        filters: &FilterPipeline,
        candidates: Vec<Candidate>,
        context: &UserContext,
    ) -> RecommendResult<Vec<Candidate>> {
        filters
            .apply(candidates, context)
            .map_err(|e| RecommendError::Internal(format!("filtering failed: {:#}", e)))
    }

    /// Resolve ranked candidates to titles, keeping their order
    fn to_recommendations(&self, candidates: Vec<Candidate>) -> Vec<Recommendation> {
        candidates
            .into_iter()
            .filter_map(|candidate| {
                let movie = self.catalog.get_movie(candidate.movie)?;
                let seed_title = candidate
                    .metadata
                    .seed_movie
                    .and_then(|idx| self.catalog.get_movie(idx))
                    .map(|m| m.title.clone());
                let explanation = explain(&candidate, seed_title.as_deref());
                Some(Recommendation {
                    title: movie.title.clone(),
                    year: movie.year,
                    score: candidate.score,
                    raw_similarity: candidate.metadata.raw_similarity,
                    source: candidate.source,
                    seed_title,
                    seed_rating: candidate.metadata.seed_rating,
                    explanation,
                })
            })
            .collect()
    }
}

/// Vectorize one corpus and build its similarity matrix
fn build_matrix<S: AsRef<str> + Sync>(
    label: &str,
    corpus: &[S],
    config: &VectorizerConfig,
) -> RecommendResult<SimilarityMatrix> {
    let space = match similarity::vectorize(corpus, config) {
        Ok(space) => space,
        Err(VectorizeError::EmptyCorpus { documents }) => {
            warn!(
                "No usable terms in the {} corpus ({} documents); all similarities will be 0",
                label, documents
            );
            VectorSpace::empty(corpus.len())
        }
        Err(err) => return Err(err.into()),
    };

    let matrix = SimilarityMatrix::from_vector_space(&space);
    info!(
        "Built {} similarity matrix: {} movies, {} terms",
        label,
        matrix.len(),
        space.n_features()
    );
    Ok(matrix)
}

fn explain(candidate: &Candidate, seed_title: Option<&str>) -> String {
    let seed = seed_title.unwrap_or("?");
    match (candidate.source, candidate.metadata.seed_rating) {
        (CandidateSource::History, Some(rating)) => format!(
            "Because you rated {} {}: similarity {:.3}, score {:.3}",
            seed, rating, candidate.metadata.raw_similarity, candidate.score
        ),
        _ => format!("Similarity {:.3} to {}", candidate.score, seed),
    }
}
