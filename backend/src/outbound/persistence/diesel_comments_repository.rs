//! PostgreSQL-backed `CommentsRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CommentsRepository, CommentsRepositoryError};
use crate::domain::{Comment, MediaRef, NewComment, SubjectId};

use super::diesel_favorites_repository::media_from_columns;
use super::diesel_helpers::{is_foreign_key_violation, map_diesel_error, map_pool_error};
use super::models::{CommentRow, NewCommentRow};
use super::pool::DbPool;
use super::schema::comments;

#[derive(Clone)]
pub struct DieselCommentsRepository {
    pool: DbPool,
}

impl DieselCommentsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_comment(row: CommentRow) -> Result<Comment, CommentsRepositoryError> {
    let subject_id = SubjectId::new(row.subject_id)
        .map_err(|err| CommentsRepositoryError::query(format!("stored subject id invalid: {err}")))?;
    let media =
        media_from_columns(&row.media_type, row.tmdb_id).map_err(CommentsRepositoryError::query)?;
    Ok(Comment {
        id: row.id,
        subject_id,
        media,
        content: row.content,
        author_name: row.author_name,
        created_at: row.created_at,
    })
}

#[async_trait]
impl CommentsRepository for DieselCommentsRepository {
    async fn list_for_media(&self, media: &MediaRef) -> Result<Vec<Comment>, CommentsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CommentRow> = comments::table
            .filter(comments::media_type.eq(media.media_type.as_str()))
            .filter(comments::tmdb_id.eq(media.media_id.as_ref()))
            .select(CommentRow::as_select())
            .order_by((comments::created_at.desc(), comments::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_comment).collect()
    }

    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: CommentRow = diesel::insert_into(comments::table)
            .values(&NewCommentRow {
                subject_id: comment.subject_id.as_ref(),
                media_type: comment.media.media_type.as_str(),
                tmdb_id: comment.media.media_id.as_ref(),
                content: comment.content.as_ref(),
                author_name: comment.author_name.as_str(),
            })
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    CommentsRepositoryError::unknown_user(comment.subject_id.as_ref())
                } else {
                    map_diesel_error(err)
                }
            })?;
        row_to_comment(row)
    }
}
