//! Comments service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CommentsCommand, CommentsQuery, CommentsRepository, CommentsRepositoryError,
};
use crate::domain::{Comment, CommentContent, Error, LocalUser, MediaRef, NewComment};

#[derive(Clone)]
pub struct CommentsService<R> {
    repo: Arc<R>,
}

impl<R> CommentsService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_comments_error(error: CommentsRepositoryError) -> Error {
    match error {
        CommentsRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("comments repository unavailable: {message}"))
        }
        CommentsRepositoryError::Query { message } => {
            Error::internal(format!("comments repository error: {message}"))
        }
        CommentsRepositoryError::UnknownUser { .. } => Error::not_found("user not found"),
    }
}

#[async_trait]
impl<R> CommentsQuery for CommentsService<R>
where
    R: CommentsRepository,
{
    async fn list(&self, media: &MediaRef) -> Result<Vec<Comment>, Error> {
        self.repo
            .list_for_media(media)
            .await
            .map_err(map_comments_error)
    }
}

#[async_trait]
impl<R> CommentsCommand for CommentsService<R>
where
    R: CommentsRepository,
{
    async fn add(
        &self,
        author: &LocalUser,
        media: MediaRef,
        content: CommentContent,
    ) -> Result<Comment, Error> {
        let comment = NewComment::from_author(author, media, content);
        self.repo.insert(&comment).await.map_err(map_comments_error)
    }
}
