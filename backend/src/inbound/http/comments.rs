//! Comment HTTP handlers.
//!
//! ```text
//! GET  /api/comments?media_type=movie&tmdb_id=27205
//! POST /api/comments {"media_type":"movie","tmdb_id":"27205","content":"..."}
//! ```
//!
//! Listing is public; posting goes through the identity stage.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Comment, CommentContent};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, parse_media_ref, scalar_text,
};

/// Query string for `GET /api/comments`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CommentsParams {
    /// `movie` or `tv`; required.
    pub media_type: Option<String>,
    /// Catalogue identifier; required.
    pub tmdb_id: Option<String>,
}

/// Request body for posting a comment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CommentRequest {
    #[schema(example = "movie")]
    pub media_type: Option<String>,
    /// Catalogue identifier; a JSON string or number.
    #[schema(value_type = String, example = "27205")]
    pub tmdb_id: Option<Value>,
    /// Between 1 and 2000 characters after trimming.
    pub content: Option<String>,
}

/// Stored comment.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: i64,
    /// Author's subject identifier.
    pub uid: String,
    pub media_type: String,
    pub tmdb_id: String,
    pub content: String,
    /// Author label captured when the comment was posted.
    pub author_name: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(value: Comment) -> Self {
        Self {
            id: value.id,
            uid: value.subject_id.into(),
            media_type: value.media.media_type.to_string(),
            tmdb_id: value.media.media_id.into(),
            content: value.content,
            author_name: value.author_name,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// List comments on a title, newest first.
#[utoipa::path(
    get,
    path = "/api/comments",
    params(CommentsParams),
    responses(
        (status = 200, description = "Comments", body = [CommentResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "listComments",
    security([])
)]
pub async fn list_comments(
    state: web::Data<HttpState>,
    params: web::Query<CommentsParams>,
) -> ApiResult<HttpResponse> {
    let media = parse_media_ref(params.media_type.as_deref(), params.tmdb_id.as_deref())?;
    let comments = state.comments_query.list(&media).await?;
    let body: Vec<CommentResponse> = comments.into_iter().map(CommentResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Post a comment as the caller.
#[utoipa::path(
    post,
    path = "/api/comments",
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "addComment",
    security(("bearer" = []))
)]
pub async fn add_comment(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CommentRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let tmdb_id = scalar_text(payload.tmdb_id.as_ref());
    let media = parse_media_ref(payload.media_type.as_deref(), tmdb_id.as_deref())?;
    let content = CommentContent::new(payload.content.unwrap_or_default())
        .map_err(|err| invalid_value_error(FieldName::new("content"), err.to_string()))?;
    let comment = state.comments.add(&user.0, media, content).await?;
    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}
