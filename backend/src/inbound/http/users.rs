//! Caller bootstrap and profile handlers.
//!
//! ```text
//! POST /api/user/bootstrap
//! GET  /api/profile
//! PUT  /api/profile {"display_name":"Ada","photo_url":"https://..."}
//! ```

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{LocalUser, ProfileUpdate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Acknowledgement body shared by write endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OkResponse {
    #[schema(example = true)]
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Cached profile of the caller.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    #[schema(example = "kXq3cA9hYVZ1uQ2")]
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl From<LocalUser> for ProfileResponse {
    fn from(user: LocalUser) -> Self {
        Self {
            uid: user.subject_id.into(),
            email: user.email,
            display_name: user.display_name,
            photo_url: user.avatar_url,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Profile edits; absent fields stay unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ProfileRequest {
    /// Truncated to 200 characters.
    pub display_name: Option<String>,
    /// Truncated to 500 characters.
    pub photo_url: Option<String>,
}

/// Ensure the caller has a local user record.
///
/// The identity stage has already reconciled the caller by the time this
/// runs, so the handler only acknowledges.
#[utoipa::path(
    post,
    path = "/api/user/bootstrap",
    responses(
        (status = 200, description = "Caller reconciled", body = OkResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Identity or storage unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "bootstrapUser",
    security(("bearer" = []))
)]
pub async fn bootstrap(_user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(OkResponse::ok())
}

/// Fetch the caller's cached profile.
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (
            status = 200,
            description = "Profile",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = ProfileResponse
        ),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getProfile",
    security(("bearer" = []))
)]
pub async fn get_profile(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let profile = state.profile.fetch_profile(&user.0.subject_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(ProfileResponse::from(profile)))
}

/// Update the caller's display name or photo.
///
/// Comments already written keep the author name captured at the time.
#[utoipa::path(
    put,
    path = "/api/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = OkResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateProfile",
    security(("bearer" = []))
)]
pub async fn update_profile(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: Option<web::Json<ProfileRequest>>,
) -> ApiResult<HttpResponse> {
    let payload = payload.map(web::Json::into_inner).unwrap_or_default();
    let update = ProfileUpdate::new(payload.display_name.as_deref(), payload.photo_url.as_deref());
    state
        .profile_command
        .update_profile(&user.0.subject_id, update)
        .await?;
    Ok(HttpResponse::Ok().json(OkResponse::ok()))
}

#[cfg(test)]
mod tests;
