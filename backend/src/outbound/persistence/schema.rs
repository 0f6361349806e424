//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes a table.

diesel::table! {
    /// Local projection of verified identities, keyed by provider subject.
    users (subject_id) {
        subject_id -> Varchar,
        email -> Nullable<Text>,
        display_name -> Nullable<Text>,
        avatar_url -> Nullable<Text>,
        /// Set on first insert; never updated.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user catalogue bookmarks, unique per `(subject_id, media_type, tmdb_id)`.
    favorites (id) {
        id -> Int8,
        subject_id -> Varchar,
        media_type -> Text,
        tmdb_id -> Text,
        title -> Nullable<Varchar>,
        poster_path -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// At most one alert preference row per user.
    alert_preferences (subject_id) {
        subject_id -> Varchar,
        frequency -> Text,
        keywords -> Varchar,
        channels -> Varchar,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only comments on catalogue items.
    comments (id) {
        id -> Int8,
        subject_id -> Varchar,
        media_type -> Text,
        tmdb_id -> Text,
        content -> Text,
        /// Author label captured at write time.
        author_name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(favorites -> users (subject_id));
diesel::joinable!(alert_preferences -> users (subject_id));
diesel::joinable!(comments -> users (subject_id));

diesel::allow_tables_to_appear_in_same_query!(users, favorites, alert_preferences, comments);
