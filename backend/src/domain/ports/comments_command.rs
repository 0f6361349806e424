//! Driving port for posting comments.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Comment, CommentContent, Error, LocalUser, MediaRef, NewComment};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsCommand: Send + Sync {
    /// Post a comment as `author`, snapshotting the author's label.
    async fn add(
        &self,
        author: &LocalUser,
        media: MediaRef,
        content: CommentContent,
    ) -> Result<Comment, Error>;
}

/// Fixture command echoing the comment back with id 1.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCommentsCommand;

#[async_trait]
impl CommentsCommand for FixtureCommentsCommand {
    async fn add(
        &self,
        author: &LocalUser,
        media: MediaRef,
        content: CommentContent,
    ) -> Result<Comment, Error> {
        let comment = NewComment::from_author(author, media, content);
        Ok(Comment {
            id: 1,
            subject_id: comment.subject_id,
            media: comment.media,
            content: comment.content.as_ref().to_owned(),
            author_name: comment.author_name,
            created_at: Utc::now(),
        })
    }
}
