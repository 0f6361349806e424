//! Port abstraction for favorites persistence.

use async_trait::async_trait;

use crate::domain::{Favorite, FavoriteAdded, MediaRef, NewFavorite, SubjectId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by favorites repository adapters.
    pub enum FavoritesRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "favorites repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "favorites repository query failed: {message}",
        /// The owning user row does not exist.
        UnknownUser { subject_id: String } => "user {subject_id} does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// List a user's favorites, newest first.
    async fn list(&self, subject_id: &SubjectId) -> Result<Vec<Favorite>, FavoritesRepositoryError>;

    /// Insert `favorite` unless the triple already exists, in which case the
    /// stored row is returned with `created = false`.
    async fn add(
        &self,
        subject_id: &SubjectId,
        favorite: &NewFavorite,
    ) -> Result<FavoriteAdded, FavoritesRepositoryError>;

    /// Delete the matching favorite. Returns `false` when nothing matched.
    async fn remove(
        &self,
        subject_id: &SubjectId,
        media: &MediaRef,
    ) -> Result<bool, FavoritesRepositoryError>;
}
