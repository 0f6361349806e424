//! Driving port for listing favorites.

use async_trait::async_trait;

use crate::domain::{Error, Favorite, SubjectId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesQuery: Send + Sync {
    /// Return the caller's favorites, newest first.
    async fn list(&self, subject_id: &SubjectId) -> Result<Vec<Favorite>, Error>;
}

/// Fixture query returning no favorites.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFavoritesQuery;

#[async_trait]
impl FavoritesQuery for FixtureFavoritesQuery {
    async fn list(&self, _subject_id: &SubjectId) -> Result<Vec<Favorite>, Error> {
        Ok(Vec::new())
    }
}
