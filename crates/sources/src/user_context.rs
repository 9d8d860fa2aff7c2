//! Build a UserContext from the injected stores.
//!
//! Resolves each rated title to its catalog position once, so candidate
//! generation works purely with indices.

use crate::types::UserContext;
use data_loader::{CatalogStore, RatingStore, StoreError};
use tracing::warn;

/// Gather a user's ratings.
///
/// - Unknown user -> `StoreError::NotFound`
/// - Unusable store -> the store's error, never `NotFound`
/// - Rated titles missing from the catalog are skipped and listed in
///   `unknown_titles`
pub fn build_user_context(
    catalog: &dyn CatalogStore,
    ratings: &dyn RatingStore,
    username: &str,
) -> Result<UserContext, StoreError> {
    if !ratings.contains_user(username)? {
        return Err(StoreError::user_not_found(username));
    }

    let mut context = UserContext::new(username);
    for vote in ratings.get_ratings(username) {
        match catalog.index_of(&vote.title) {
            Some(idx) => context.add_rating(idx, vote.rating),
            None => {
                warn!(
                    "User {} rated '{}', which is not in the catalog",
                    username, vote.title
                );
                context.unknown_titles.push(vote.title);
            }
        }
    }

    Ok(context)
}
