//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence adapters, the driving/driven ports between them, and the
//! services that implement the driving ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - SubjectId / LocalUser / IdentityClaim: identity projection.
//! - Favorite, AlertPreference, Comment: per-user state.
//! - Metadata query types mapping proxy requests onto upstream calls.

pub mod alerts;
pub mod alerts_service;
pub mod auth;
pub mod comments;
pub mod comments_service;
pub mod error;
pub mod favorites;
pub mod favorites_service;
pub mod identity_reconciler;
pub mod media;
pub mod metadata;
pub mod metadata_service;
pub mod ports;
pub mod profile_service;
pub mod text;
pub mod trace_id;
pub mod user;

pub use self::alerts::{
    ALERT_CHANNELS_MAX, ALERT_KEYWORDS_MAX, AlertFrequency, AlertPreference,
    AlertPreferenceUpdate, ParseAlertFrequencyError,
};
pub use self::alerts_service::AlertsService;
pub use self::auth::{BearerToken, BearerTokenError, IdentityClaim};
pub use self::comments::{
    COMMENT_AUTHOR_NAME_MAX, COMMENT_CONTENT_MAX, Comment, CommentContent,
    CommentValidationError, NewComment,
};
pub use self::comments_service::CommentsService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::favorites::{
    FAVORITE_POSTER_PATH_MAX, FAVORITE_TITLE_MAX, Favorite, FavoriteAdded, NewFavorite,
};
pub use self::favorites_service::FavoritesService;
pub use self::identity_reconciler::IdentityReconciler;
pub use self::media::{MediaId, MediaIdValidationError, MediaRef, MediaType, ParseMediaTypeError};
pub use self::metadata::{
    DEFAULT_LANGUAGE, DEFAULT_PAGE, DEFAULT_REGION, DEFAULT_SORT_BY, DetailsQuery, DiscoverQuery,
    MEDIA_BACKDROP_LIMIT, MediaAssets, MediaQuery, SearchQuery, TimeWindow, TrendingQuery,
    TrendingScope, UpstreamRequest,
};
pub use self::metadata_service::{METADATA_KEY_MISSING, MetadataService};
pub use self::profile_service::ProfileService;
pub use self::text::{truncate_chars, truncate_optional};
pub use self::trace_id::TraceId;
pub use self::user::{
    LocalUser, PROFILE_AVATAR_URL_MAX, PROFILE_DISPLAY_NAME_MAX, ProfileUpdate, SUBJECT_ID_MAX,
    SubjectId, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use marquee::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such title"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
