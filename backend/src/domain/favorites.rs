//! Favorites: a user's bookmarks of catalogue items.
//!
//! The triple `(subject_id, media_type, media_id)` is unique. Adding an
//! existing triple is not an error; it returns the stored record instead.

use chrono::{DateTime, Utc};

use super::text::truncate_optional;
use super::{MediaRef, SubjectId};

/// Maximum stored title length.
pub const FAVORITE_TITLE_MAX: usize = 300;
/// Maximum stored poster path length.
pub const FAVORITE_POSTER_PATH_MAX: usize = 500;

/// Stored favorite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub id: i64,
    pub subject_id: SubjectId,
    pub media: MediaRef,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated input for adding a favorite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFavorite {
    media: MediaRef,
    title: Option<String>,
    poster_path: Option<String>,
}

impl NewFavorite {
    /// Build the input, truncating the optional display fields.
    ///
    /// # Examples
    /// ```
    /// use marquee::domain::{MediaId, MediaRef, MediaType, NewFavorite};
    ///
    /// let media = MediaRef::new(MediaType::Movie, MediaId::new("27205").unwrap());
    /// let favorite = NewFavorite::new(media, Some("Inception"), None);
    /// assert_eq!(favorite.title(), Some("Inception"));
    /// ```
    pub fn new(media: MediaRef, title: Option<&str>, poster_path: Option<&str>) -> Self {
        Self {
            media,
            title: truncate_optional(title, FAVORITE_TITLE_MAX),
            poster_path: truncate_optional(poster_path, FAVORITE_POSTER_PATH_MAX),
        }
    }

    pub fn media(&self) -> &MediaRef {
        &self.media
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn poster_path(&self) -> Option<&str> {
        self.poster_path.as_deref()
    }
}

/// Outcome of an idempotent add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteAdded {
    pub favorite: Favorite,
    /// `true` when a new row was inserted, `false` when the triple existed.
    pub created: bool,
}
