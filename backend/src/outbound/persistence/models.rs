//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{alert_preferences, comments, favorites, users};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub subject_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub subject_id: &'a str,
    pub email: Option<&'a str>,
    pub display_name: Option<&'a str>,
    pub avatar_url: Option<&'a str>,
}

/// Claim-driven rewrite of the cached identity fields.
///
/// `treat_none_as_null` makes a cleared claim attribute clear the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserClaimChangeset<'a> {
    pub email: Option<&'a str>,
    pub display_name: Option<&'a str>,
    pub avatar_url: Option<&'a str>,
}

/// Caller profile edit; `None` leaves the column untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileChangeset<'a> {
    pub display_name: Option<&'a str>,
    pub avatar_url: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = favorites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FavoriteRow {
    pub id: i64,
    pub subject_id: String,
    pub media_type: String,
    pub tmdb_id: String,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = favorites)]
pub(crate) struct NewFavoriteRow<'a> {
    pub subject_id: &'a str,
    pub media_type: &'a str,
    pub tmdb_id: &'a str,
    pub title: Option<&'a str>,
    pub poster_path: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Alert preferences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = alert_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AlertPreferenceRow {
    pub frequency: String,
    pub keywords: String,
    pub channels: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = alert_preferences)]
pub(crate) struct AlertPreferenceWrite<'a> {
    pub subject_id: &'a str,
    pub frequency: &'a str,
    pub keywords: &'a str,
    pub channels: &'a str,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: i64,
    pub subject_id: String,
    pub media_type: String,
    pub tmdb_id: String,
    pub content: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub subject_id: &'a str,
    pub media_type: &'a str,
    pub tmdb_id: &'a str,
    pub content: &'a str,
    pub author_name: &'a str,
}
