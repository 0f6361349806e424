//! Comments: public remarks on catalogue items.
//!
//! Comments are append-only. The author name is captured when the comment is
//! written and is not refreshed when the author's profile changes later.

use std::fmt;

use chrono::{DateTime, Utc};

use super::text::truncate_chars;
use super::{LocalUser, MediaRef, SubjectId};

/// Maximum comment length in characters.
pub const COMMENT_CONTENT_MAX: usize = 2000;
/// Maximum stored author name length.
pub const COMMENT_AUTHOR_NAME_MAX: usize = 255;

/// Validation errors for [`CommentContent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentValidationError {
    EmptyContent,
    ContentTooLong { max: usize },
}

impl fmt::Display for CommentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "content required"),
            Self::ContentTooLong { max } => {
                write!(f, "content too long (max {max} characters)")
            }
        }
    }
}

impl std::error::Error for CommentValidationError {}

/// Comment body.
///
/// ## Invariants
/// - Trimmed, between 1 and [`COMMENT_CONTENT_MAX`] characters.
///
/// # Examples
/// ```
/// use marquee::domain::CommentContent;
///
/// assert!(CommentContent::new("  great film ").is_ok());
/// assert!(CommentContent::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentContent(String);

impl CommentContent {
    pub fn new(content: impl AsRef<str>) -> Result<Self, CommentValidationError> {
        let trimmed = content.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CommentValidationError::EmptyContent);
        }
        if trimmed.chars().count() > COMMENT_CONTENT_MAX {
            return Err(CommentValidationError::ContentTooLong {
                max: COMMENT_CONTENT_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for CommentContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Stored comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub subject_id: SubjectId,
    pub media: MediaRef,
    pub content: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

/// Fully resolved comment ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub subject_id: SubjectId,
    pub media: MediaRef,
    pub content: CommentContent,
    pub author_name: String,
}

impl NewComment {
    /// Snapshot the author's label from `author` at call time.
    pub fn from_author(author: &LocalUser, media: MediaRef, content: CommentContent) -> Self {
        Self {
            subject_id: author.subject_id.clone(),
            media,
            content,
            author_name: truncate_chars(author.author_label(), COMMENT_AUTHOR_NAME_MAX),
        }
    }
}
