//! Favorites service implementing the favorites driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    FavoritesCommand, FavoritesQuery, FavoritesRepository, FavoritesRepositoryError,
};
use crate::domain::{Error, Favorite, FavoriteAdded, MediaRef, NewFavorite, SubjectId};

#[derive(Clone)]
pub struct FavoritesService<R> {
    repo: Arc<R>,
}

impl<R> FavoritesService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_favorites_error(error: FavoritesRepositoryError) -> Error {
    match error {
        FavoritesRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("favorites repository unavailable: {message}"))
        }
        FavoritesRepositoryError::Query { message } => {
            Error::internal(format!("favorites repository error: {message}"))
        }
        FavoritesRepositoryError::UnknownUser { .. } => Error::not_found("user not found"),
    }
}

#[async_trait]
impl<R> FavoritesQuery for FavoritesService<R>
where
    R: FavoritesRepository,
{
    async fn list(&self, subject_id: &SubjectId) -> Result<Vec<Favorite>, Error> {
        self.repo.list(subject_id).await.map_err(map_favorites_error)
    }
}

#[async_trait]
impl<R> FavoritesCommand for FavoritesService<R>
where
    R: FavoritesRepository,
{
    async fn add(
        &self,
        subject_id: &SubjectId,
        favorite: NewFavorite,
    ) -> Result<FavoriteAdded, Error> {
        let added = self
            .repo
            .add(subject_id, &favorite)
            .await
            .map_err(map_favorites_error)?;
        debug!(
            %subject_id,
            media_type = %added.favorite.media.media_type,
            media_id = %added.favorite.media.media_id,
            created = added.created,
            "favorite stored"
        );
        Ok(added)
    }

    async fn remove(&self, subject_id: &SubjectId, media: MediaRef) -> Result<(), Error> {
        let removed = self
            .repo
            .remove(subject_id, &media)
            .await
            .map_err(map_favorites_error)?;
        if removed {
            Ok(())
        } else {
            Err(Error::not_found("not found"))
        }
    }
}
