//! Driving port for listing comments on a catalogue item.

use async_trait::async_trait;

use crate::domain::{Comment, Error, MediaRef};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsQuery: Send + Sync {
    /// Return comments on `media`, newest first. Requires no identity.
    async fn list(&self, media: &MediaRef) -> Result<Vec<Comment>, Error>;
}

/// Fixture query returning no comments.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCommentsQuery;

#[async_trait]
impl CommentsQuery for FixtureCommentsQuery {
    async fn list(&self, _media: &MediaRef) -> Result<Vec<Comment>, Error> {
        Ok(Vec::new())
    }
}
