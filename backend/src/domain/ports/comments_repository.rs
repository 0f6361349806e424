//! Port abstraction for comment persistence.

use async_trait::async_trait;

use crate::domain::{Comment, MediaRef, NewComment};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by comment repository adapters.
    pub enum CommentsRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "comments repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comments repository query failed: {message}",
        /// The author row does not exist.
        UnknownUser { subject_id: String } => "user {subject_id} does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsRepository: Send + Sync {
    /// List comments on one catalogue item, newest first.
    async fn list_for_media(&self, media: &MediaRef) -> Result<Vec<Comment>, CommentsRepositoryError>;

    /// Persist a comment and return it with its assigned id and timestamp.
    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentsRepositoryError>;
}
