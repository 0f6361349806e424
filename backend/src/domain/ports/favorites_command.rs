//! Driving port for adding and removing favorites.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Error, Favorite, FavoriteAdded, MediaRef, NewFavorite, SubjectId};

/// Domain use-case port for favorite mutations.
///
/// Adding is idempotent: re-adding an existing item returns the stored row
/// with `created = false`. Removing a missing item yields `NotFound`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesCommand: Send + Sync {
    async fn add(&self, subject_id: &SubjectId, favorite: NewFavorite)
    -> Result<FavoriteAdded, Error>;

    async fn remove(&self, subject_id: &SubjectId, media: MediaRef) -> Result<(), Error>;
}

/// Fixture command that echoes every add as newly created.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFavoritesCommand;

#[async_trait]
impl FavoritesCommand for FixtureFavoritesCommand {
    async fn add(
        &self,
        subject_id: &SubjectId,
        favorite: NewFavorite,
    ) -> Result<FavoriteAdded, Error> {
        Ok(FavoriteAdded {
            favorite: Favorite {
                id: 1,
                subject_id: subject_id.clone(),
                media: favorite.media().clone(),
                title: favorite.title().map(str::to_owned),
                poster_path: favorite.poster_path().map(str::to_owned),
                created_at: Utc::now(),
            },
            created: true,
        })
    }

    async fn remove(&self, _subject_id: &SubjectId, _media: MediaRef) -> Result<(), Error> {
        Ok(())
    }
}
