//! Metadata proxy HTTP handlers.
//!
//! ```text
//! GET /api/search?type=movie|tv&query=..&page&language&year
//! GET /api/discover?type&language&region&include_adult&sort_by&page&with_genres&year&fromDate&toDate
//! GET /api/trending?type=all|movie|tv&window=day|week&page&language&region
//! GET /api/details?type=movie|tv&id=..&language
//! GET /api/media?type=movie|tv&id=..
//! ```
//!
//! Parameters are validated here before any upstream call; the relayed body
//! is returned untouched with status 200.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    DEFAULT_LANGUAGE, DEFAULT_PAGE, DEFAULT_REGION, DEFAULT_SORT_BY, DetailsQuery, DiscoverQuery,
    MediaQuery, SearchQuery, TimeWindow, TrendingQuery, TrendingScope,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_choice_error, optional_trimmed, parse_catalogue_id, parse_media_type,
    parse_media_type_or_movie, require_trimmed, trimmed_or,
};

const TYPE: FieldName = FieldName::new("type");
const ID: FieldName = FieldName::new("id");

/// Query string for `GET /api/search`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// `movie` (default) or `tv`.
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    /// Title search text; required.
    pub query: Option<String>,
    pub page: Option<String>,
    pub language: Option<String>,
    /// Release year (movies) or first air year (TV).
    pub year: Option<String>,
}

/// Query string for `GET /api/discover`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DiscoverParams {
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub language: Option<String>,
    pub region: Option<String>,
    pub include_adult: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<String>,
    pub with_genres: Option<String>,
    pub year: Option<String>,
    /// Earliest release or first air date, `YYYY-MM-DD`.
    #[serde(rename = "fromDate")]
    pub from_date: Option<String>,
    /// Latest release or first air date, `YYYY-MM-DD`.
    #[serde(rename = "toDate")]
    pub to_date: Option<String>,
}

/// Query string for `GET /api/trending`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TrendingParams {
    /// `all` (default), `movie` or `tv`.
    #[serde(rename = "type")]
    pub scope: Option<String>,
    /// `day` (default) or `week`.
    pub window: Option<String>,
    pub page: Option<String>,
    pub language: Option<String>,
    pub region: Option<String>,
}

/// Query string for `GET /api/details`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DetailsParams {
    /// `movie` or `tv`, case-insensitive; required.
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub id: Option<String>,
    pub language: Option<String>,
}

/// Query string for `GET /api/media`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MediaParams {
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub id: Option<String>,
}

/// Upstream JSON body relayed unchanged.
#[derive(Debug, ToSchema)]
#[schema(value_type = Object)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UpstreamPayloadSchema(serde_json::Value);

/// Curated trailers and backdrops.
#[derive(Debug, ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MediaAssetsSchema {
    trailers: Vec<serde_json::Value>,
    backdrops: Vec<serde_json::Value>,
}

impl SearchParams {
    fn parse(&self) -> ApiResult<SearchQuery> {
        let query = require_trimmed(self.query.as_deref(), FieldName::new("query"))?;
        Ok(SearchQuery {
            media_type: parse_media_type_or_movie(self.media_type.as_deref(), TYPE)?,
            query,
            page: trimmed_or(self.page.as_deref(), DEFAULT_PAGE),
            language: trimmed_or(self.language.as_deref(), DEFAULT_LANGUAGE),
            year: optional_trimmed(self.year.as_deref()),
        })
    }
}

impl DiscoverParams {
    fn parse(&self) -> ApiResult<DiscoverQuery> {
        Ok(DiscoverQuery {
            media_type: parse_media_type_or_movie(self.media_type.as_deref(), TYPE)?,
            language: trimmed_or(self.language.as_deref(), DEFAULT_LANGUAGE),
            region: trimmed_or(self.region.as_deref(), DEFAULT_REGION),
            include_adult: trimmed_or(self.include_adult.as_deref(), "false"),
            sort_by: trimmed_or(self.sort_by.as_deref(), DEFAULT_SORT_BY),
            page: trimmed_or(self.page.as_deref(), DEFAULT_PAGE),
            with_genres: optional_trimmed(self.with_genres.as_deref()),
            year: optional_trimmed(self.year.as_deref()),
            from_date: optional_trimmed(self.from_date.as_deref()),
            to_date: optional_trimmed(self.to_date.as_deref()),
        })
    }
}

impl TrendingParams {
    fn parse(&self) -> ApiResult<TrendingQuery> {
        let scope = match optional_trimmed(self.scope.as_deref()) {
            Some(raw) => raw
                .parse::<TrendingScope>()
                .map_err(|value| invalid_choice_error(TYPE, &value))?,
            None => TrendingScope::default(),
        };
        let window = match optional_trimmed(self.window.as_deref()) {
            Some(raw) => raw
                .parse::<TimeWindow>()
                .map_err(|value| invalid_choice_error(FieldName::new("window"), &value))?,
            None => TimeWindow::default(),
        };
        Ok(TrendingQuery {
            scope,
            window,
            page: trimmed_or(self.page.as_deref(), DEFAULT_PAGE),
            language: trimmed_or(self.language.as_deref(), DEFAULT_LANGUAGE),
            region: trimmed_or(self.region.as_deref(), DEFAULT_REGION),
        })
    }
}

impl DetailsParams {
    fn parse(&self) -> ApiResult<DetailsQuery> {
        Ok(DetailsQuery {
            media_type: parse_media_type(self.media_type.as_deref(), TYPE)?,
            id: parse_catalogue_id(self.id.as_deref(), ID)?,
            language: trimmed_or(self.language.as_deref(), DEFAULT_LANGUAGE),
        })
    }
}

impl MediaParams {
    fn parse(&self) -> ApiResult<MediaQuery> {
        Ok(MediaQuery {
            media_type: parse_media_type_or_movie(self.media_type.as_deref(), TYPE)?,
            id: parse_catalogue_id(self.id.as_deref(), ID)?,
        })
    }
}

/// Search titles by name.
#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Upstream search payload", body = UpstreamPayloadSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 502, description = "Upstream error", body = ErrorSchema),
        (status = 503, description = "Metadata API key missing", body = ErrorSchema),
        (status = 504, description = "Upstream timeout", body = ErrorSchema)
    ),
    tags = ["metadata"],
    operation_id = "searchTitles",
    security([])
)]
pub async fn search(
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<HttpResponse> {
    let query = params.parse()?;
    let body = state.metadata.search(query).await?;
    Ok(HttpResponse::Ok().json(body))
}

/// Discover titles by filter.
#[utoipa::path(
    get,
    path = "/api/discover",
    params(DiscoverParams),
    responses(
        (status = 200, description = "Upstream discovery payload", body = UpstreamPayloadSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 502, description = "Upstream error", body = ErrorSchema),
        (status = 503, description = "Metadata API key missing", body = ErrorSchema),
        (status = 504, description = "Upstream timeout", body = ErrorSchema)
    ),
    tags = ["metadata"],
    operation_id = "discoverTitles",
    security([])
)]
pub async fn discover(
    state: web::Data<HttpState>,
    params: web::Query<DiscoverParams>,
) -> ApiResult<HttpResponse> {
    let query = params.parse()?;
    let body = state.metadata.discover(query).await?;
    Ok(HttpResponse::Ok().json(body))
}

/// Trending titles for a day or week.
#[utoipa::path(
    get,
    path = "/api/trending",
    params(TrendingParams),
    responses(
        (status = 200, description = "Upstream trending payload", body = UpstreamPayloadSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 502, description = "Upstream error", body = ErrorSchema),
        (status = 503, description = "Metadata API key missing", body = ErrorSchema),
        (status = 504, description = "Upstream timeout", body = ErrorSchema)
    ),
    tags = ["metadata"],
    operation_id = "trendingTitles",
    security([])
)]
pub async fn trending(
    state: web::Data<HttpState>,
    params: web::Query<TrendingParams>,
) -> ApiResult<HttpResponse> {
    let query = params.parse()?;
    let body = state.metadata.trending(query).await?;
    Ok(HttpResponse::Ok().json(body))
}

/// Title details with credits, videos and recommendations.
#[utoipa::path(
    get,
    path = "/api/details",
    params(DetailsParams),
    responses(
        (status = 200, description = "Upstream details payload", body = UpstreamPayloadSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 502, description = "Upstream error", body = ErrorSchema),
        (status = 503, description = "Metadata API key missing", body = ErrorSchema),
        (status = 504, description = "Upstream timeout", body = ErrorSchema)
    ),
    tags = ["metadata"],
    operation_id = "titleDetails",
    security([])
)]
pub async fn details(
    state: web::Data<HttpState>,
    params: web::Query<DetailsParams>,
) -> ApiResult<HttpResponse> {
    let query = params.parse()?;
    let body = state.metadata.details(query).await?;
    Ok(HttpResponse::Ok().json(body))
}

/// YouTube trailers and backdrops for a title.
#[utoipa::path(
    get,
    path = "/api/media",
    params(MediaParams),
    responses(
        (status = 200, description = "Trailers and backdrops", body = MediaAssetsSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 502, description = "Upstream error", body = ErrorSchema),
        (status = 503, description = "Metadata API key missing", body = ErrorSchema),
        (status = 504, description = "Upstream timeout", body = ErrorSchema)
    ),
    tags = ["metadata"],
    operation_id = "titleMedia",
    security([])
)]
pub async fn media(
    state: web::Data<HttpState>,
    params: web::Query<MediaParams>,
) -> ApiResult<HttpResponse> {
    let query = params.parse()?;
    let assets = state.metadata.media(query).await?;
    Ok(HttpResponse::Ok().json(assets))
}
