//! PostgreSQL-backed `FavoritesRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{FavoritesRepository, FavoritesRepositoryError};
use crate::domain::{Favorite, FavoriteAdded, MediaId, MediaRef, NewFavorite, SubjectId};

use super::diesel_helpers::{is_foreign_key_violation, map_diesel_error, map_pool_error};
use super::models::{FavoriteRow, NewFavoriteRow};
use super::pool::DbPool;
use super::schema::favorites;

#[derive(Clone)]
pub struct DieselFavoritesRepository {
    pool: DbPool,
}

impl DieselFavoritesRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub(super) fn media_from_columns(
    media_type: &str,
    tmdb_id: String,
) -> Result<MediaRef, String> {
    let media_type = media_type.parse().map_err(|err| format!("{err}"))?;
    let media_id = MediaId::new(tmdb_id).map_err(|err| format!("stored media id invalid: {err}"))?;
    Ok(MediaRef::new(media_type, media_id))
}

fn row_to_favorite(
    subject_id: &SubjectId,
    row: FavoriteRow,
) -> Result<Favorite, FavoritesRepositoryError> {
    let media =
        media_from_columns(&row.media_type, row.tmdb_id).map_err(FavoritesRepositoryError::query)?;
    Ok(Favorite {
        id: row.id,
        subject_id: subject_id.clone(),
        media,
        title: row.title,
        poster_path: row.poster_path,
        created_at: row.created_at,
    })
}

fn map_write_error(subject_id: &SubjectId, error: DieselError) -> FavoritesRepositoryError {
    if is_foreign_key_violation(&error) {
        FavoritesRepositoryError::unknown_user(subject_id.as_ref())
    } else {
        map_diesel_error(error)
    }
}

#[async_trait]
impl FavoritesRepository for DieselFavoritesRepository {
    async fn list(&self, subject_id: &SubjectId) -> Result<Vec<Favorite>, FavoritesRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<FavoriteRow> = favorites::table
            .filter(favorites::subject_id.eq(subject_id.as_ref()))
            .select(FavoriteRow::as_select())
            .order_by((favorites::created_at.desc(), favorites::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| row_to_favorite(subject_id, row))
            .collect()
    }

    async fn add(
        &self,
        subject_id: &SubjectId,
        favorite: &NewFavorite,
    ) -> Result<FavoriteAdded, FavoritesRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let media = favorite.media();
        let new_row = NewFavoriteRow {
            subject_id: subject_id.as_ref(),
            media_type: media.media_type.as_str(),
            tmdb_id: media.media_id.as_ref(),
            title: favorite.title(),
            poster_path: favorite.poster_path(),
        };

        let (row, created) = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    let inserted: Option<FavoriteRow> = diesel::insert_into(favorites::table)
                        .values(&new_row)
                        .on_conflict((
                            favorites::subject_id,
                            favorites::media_type,
                            favorites::tmdb_id,
                        ))
                        .do_nothing()
                        .returning(FavoriteRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()?;
                    if let Some(row) = inserted {
                        return Ok((row, true));
                    }

                    let existing: FavoriteRow = favorites::table
                        .filter(favorites::subject_id.eq(new_row.subject_id))
                        .filter(favorites::media_type.eq(new_row.media_type))
                        .filter(favorites::tmdb_id.eq(new_row.tmdb_id))
                        .select(FavoriteRow::as_select())
                        .first(conn)
                        .await?;
                    Ok((existing, false))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_write_error(subject_id, err))?;

        Ok(FavoriteAdded {
            favorite: row_to_favorite(subject_id, row)?,
            created,
        })
    }

    async fn remove(
        &self,
        subject_id: &SubjectId,
        media: &MediaRef,
    ) -> Result<bool, FavoritesRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            favorites::table
                .filter(favorites::subject_id.eq(subject_id.as_ref()))
                .filter(favorites::media_type.eq(media.media_type.as_str()))
                .filter(favorites::tmdb_id.eq(media.media_id.as_ref())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
