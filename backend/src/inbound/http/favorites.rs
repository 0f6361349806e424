//! Favorites HTTP handlers.
//!
//! ```text
//! GET    /api/favorites
//! POST   /api/favorites {"media_type":"movie","tmdb_id":"27205","title":"Inception"}
//! DELETE /api/favorites/{media_type}/{tmdb_id}
//! ```

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Favorite, NewFavorite};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::OkResponse;
use crate::inbound::http::validation::{optional_trimmed, parse_media_ref, scalar_text};

/// Request body for adding a favorite.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct FavoriteRequest {
    #[schema(example = "movie")]
    pub media_type: Option<String>,
    /// Catalogue identifier; a JSON string or number.
    #[schema(value_type = String, example = "27205")]
    pub tmdb_id: Option<Value>,
    #[schema(example = "Inception")]
    pub title: Option<String>,
    pub poster_path: Option<String>,
}

/// Stored favorite as returned by `GET /api/favorites`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FavoriteResponse {
    pub id: i64,
    #[schema(example = "movie")]
    pub media_type: String,
    #[schema(example = "27205")]
    pub tmdb_id: String,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl From<Favorite> for FavoriteResponse {
    fn from(value: Favorite) -> Self {
        Self {
            id: value.id,
            media_type: value.media.media_type.to_string(),
            tmdb_id: value.media.media_id.into(),
            title: value.title,
            poster_path: value.poster_path,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Acknowledgement for `POST /api/favorites`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FavoriteAddedResponse {
    pub ok: bool,
    pub id: i64,
}

fn parse_favorite_request(payload: FavoriteRequest) -> ApiResult<NewFavorite> {
    let tmdb_id = scalar_text(payload.tmdb_id.as_ref());
    let media = parse_media_ref(payload.media_type.as_deref(), tmdb_id.as_deref())?;
    let title = optional_trimmed(payload.title.as_deref());
    let poster_path = optional_trimmed(payload.poster_path.as_deref());
    Ok(NewFavorite::new(
        media,
        title.as_deref(),
        poster_path.as_deref(),
    ))
}

/// List the caller's favorites, newest first.
#[utoipa::path(
    get,
    path = "/api/favorites",
    responses(
        (
            status = 200,
            description = "Favorites",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = [FavoriteResponse]
        ),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "listFavorites",
    security(("bearer" = []))
)]
pub async fn list_favorites(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let favorites = state.favorites_query.list(&user.0.subject_id).await?;
    let body: Vec<FavoriteResponse> = favorites.into_iter().map(FavoriteResponse::from).collect();
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(body))
}

/// Add a favorite; repeating the call returns the existing id.
#[utoipa::path(
    post,
    path = "/api/favorites",
    request_body = FavoriteRequest,
    responses(
        (status = 201, description = "Favorite created", body = FavoriteAddedResponse),
        (status = 200, description = "Favorite already present", body = FavoriteAddedResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "addFavorite",
    security(("bearer" = []))
)]
pub async fn add_favorite(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<FavoriteRequest>,
) -> ApiResult<HttpResponse> {
    let favorite = parse_favorite_request(payload.into_inner())?;
    let added = state.favorites.add(&user.0.subject_id, favorite).await?;
    let body = FavoriteAddedResponse {
        ok: true,
        id: added.favorite.id,
    };
    let mut response = if added.created {
        HttpResponse::Created()
    } else {
        HttpResponse::Ok()
    };
    Ok(response.json(body))
}

/// Remove one of the caller's favorites.
#[utoipa::path(
    delete,
    path = "/api/favorites/{media_type}/{tmdb_id}",
    params(
        ("media_type" = String, Path, description = "`movie` or `tv`"),
        ("tmdb_id" = String, Path, description = "Catalogue identifier")
    ),
    responses(
        (status = 200, description = "Favorite removed", body = OkResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Favorite not found", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "removeFavorite",
    security(("bearer" = []))
)]
pub async fn remove_favorite(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (media_type, tmdb_id) = path.into_inner();
    let media = parse_media_ref(Some(&media_type), Some(&tmdb_id))?;
    state.favorites.remove(&user.0.subject_id, media).await?;
    Ok(HttpResponse::Ok().json(OkResponse::ok()))
}
