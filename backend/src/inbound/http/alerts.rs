//! Alert preference HTTP handlers.
//!
//! ```text
//! GET /api/alerts
//! PUT /api/alerts {"frequency":"daily","keywords":"horror","channels":"email"}
//! ```

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AlertFrequency, AlertPreference, AlertPreferenceUpdate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::OkResponse;
use crate::inbound::http::validation::{FieldName, invalid_choice_error, optional_trimmed};

/// Request body for replacing alert preferences.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AlertsRequest {
    /// `daily`, `weekly` (default) or `monthly`; case-insensitive.
    #[schema(example = "daily")]
    pub frequency: Option<String>,
    /// Truncated to 1000 characters after trimming.
    #[schema(example = "horror")]
    pub keywords: Option<String>,
    /// Truncated to 200 characters after trimming.
    #[schema(example = "email")]
    pub channels: Option<String>,
}

/// Alert preferences as stored, or the unsaved default.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AlertsResponse {
    #[schema(example = "weekly")]
    pub frequency: String,
    pub keywords: String,
    pub channels: String,
    /// RFC 3339 timestamp of the last write; `null` before the first save.
    pub updated_at: Option<String>,
}

impl From<AlertPreference> for AlertsResponse {
    fn from(value: AlertPreference) -> Self {
        Self {
            frequency: value.frequency.to_string(),
            keywords: value.keywords,
            channels: value.channels,
            updated_at: value.updated_at.map(|at| at.to_rfc3339()),
        }
    }
}

fn parse_alerts_request(payload: &AlertsRequest) -> ApiResult<AlertPreferenceUpdate> {
    let frequency = match optional_trimmed(payload.frequency.as_deref()) {
        Some(raw) => raw
            .parse::<AlertFrequency>()
            .map_err(|_| invalid_choice_error(FieldName::new("frequency"), &raw))?,
        None => AlertFrequency::default(),
    };
    Ok(AlertPreferenceUpdate::new(
        frequency,
        payload.keywords.as_deref().unwrap_or_default(),
        payload.channels.as_deref().unwrap_or_default(),
    ))
}

/// Fetch the caller's alert preferences.
#[utoipa::path(
    get,
    path = "/api/alerts",
    responses(
        (
            status = 200,
            description = "Alert preferences",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = AlertsResponse
        ),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["alerts"],
    operation_id = "getAlerts",
    security(("bearer" = []))
)]
pub async fn get_alerts(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let preference = state.alerts_query.get(&user.0.subject_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(AlertsResponse::from(preference)))
}

/// Create or replace the caller's alert preferences.
#[utoipa::path(
    put,
    path = "/api/alerts",
    request_body = AlertsRequest,
    responses(
        (status = 200, description = "Alert preferences saved", body = OkResponse),
        (status = 400, description = "Invalid frequency", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["alerts"],
    operation_id = "updateAlerts",
    security(("bearer" = []))
)]
pub async fn update_alerts(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: Option<web::Json<AlertsRequest>>,
) -> ApiResult<HttpResponse> {
    let payload = payload.map(web::Json::into_inner).unwrap_or_default();
    let update = parse_alerts_request(&payload)?;
    state.alerts.upsert(&user.0.subject_id, update).await?;
    Ok(HttpResponse::Ok().json(OkResponse::ok()))
}
