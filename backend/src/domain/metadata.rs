//! Metadata proxy queries and their mapping onto upstream API requests.
//!
//! Inbound adapters validate raw parameters into these types; the mapping to
//! upstream paths and query strings lives here so every transport shares it.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::{MediaId, MediaType};

/// Default language forwarded when the caller does not choose one.
pub const DEFAULT_LANGUAGE: &str = "en-US";
/// Default region forwarded when the caller does not choose one.
pub const DEFAULT_REGION: &str = "US";
/// Default sort order for discovery.
pub const DEFAULT_SORT_BY: &str = "popularity.desc";
/// Default page forwarded when the caller does not choose one.
pub const DEFAULT_PAGE: &str = "1";
/// Maximum number of backdrops returned by the media endpoint.
pub const MEDIA_BACKDROP_LIMIT: usize = 20;

const DETAILS_APPENDED_RESOURCES: &str = "credits,videos,recommendations";

/// Media type filter accepted by the trending endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendingScope {
    #[default]
    All,
    Movie,
    Tv,
}

impl TrendingScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

impl std::str::FromStr for TrendingScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "movie" => Ok(Self::Movie),
            "tv" => Ok(Self::Tv),
            other => Err(other.to_owned()),
        }
    }
}

/// Trending aggregation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    #[default]
    Day,
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

impl std::str::FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            other => Err(other.to_owned()),
        }
    }
}

/// Fully resolved upstream call: path segments relative to the API base plus
/// query parameters (credentials excluded).
///
/// Segments are kept apart so transports can encode caller-supplied values
/// one segment at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub segments: Vec<String>,
    pub params: Vec<(&'static str, String)>,
}

impl UpstreamRequest {
    fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            params: Vec::new(),
        }
    }

    /// Unencoded `/`-joined path, for logs and assertions.
    pub fn path(&self) -> String {
        self.segments
            .iter()
            .fold(String::new(), |path, segment| path + "/" + segment)
    }

    fn param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    fn optional_param(self, key: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(raw) => self.param(key, raw),
            None => self,
        }
    }

    /// Look up the first value for `key`.
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for UpstreamRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn year_key(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Movie => "year",
        MediaType::Tv => "first_air_date_year",
    }
}

fn release_range_keys(media_type: MediaType) -> (&'static str, &'static str) {
    match media_type {
        MediaType::Movie => ("primary_release_date.gte", "primary_release_date.lte"),
        MediaType::Tv => ("first_air_date.gte", "first_air_date.lte"),
    }
}

/// Title search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub media_type: MediaType,
    pub query: String,
    pub page: String,
    pub language: String,
    pub year: Option<String>,
}

impl SearchQuery {
    pub fn to_upstream(&self) -> UpstreamRequest {
        UpstreamRequest::new(["search", self.media_type.as_str()])
            .param("query", self.query.as_str())
            .param("page", self.page.as_str())
            .param("language", self.language.as_str())
            .param("include_adult", "false")
            .optional_param(year_key(self.media_type), self.year.as_deref())
    }
}

/// Filtered discovery listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverQuery {
    pub media_type: MediaType,
    pub language: String,
    pub region: String,
    pub include_adult: String,
    pub sort_by: String,
    pub page: String,
    pub with_genres: Option<String>,
    pub year: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

impl DiscoverQuery {
    pub fn to_upstream(&self) -> UpstreamRequest {
        let (gte, lte) = release_range_keys(self.media_type);
        UpstreamRequest::new(["discover", self.media_type.as_str()])
            .param("language", self.language.as_str())
            .param("region", self.region.as_str())
            .param("include_adult", self.include_adult.as_str())
            .param("sort_by", self.sort_by.as_str())
            .param("page", self.page.as_str())
            .optional_param("with_genres", self.with_genres.as_deref())
            .optional_param(year_key(self.media_type), self.year.as_deref())
            .optional_param(gte, self.from_date.as_deref())
            .optional_param(lte, self.to_date.as_deref())
    }
}

/// Trending listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingQuery {
    pub scope: TrendingScope,
    pub window: TimeWindow,
    pub page: String,
    pub language: String,
    pub region: String,
}

impl TrendingQuery {
    pub fn to_upstream(&self) -> UpstreamRequest {
        UpstreamRequest::new(["trending", self.scope.as_str(), self.window.as_str()])
        .param("page", self.page.as_str())
        .param("language", self.language.as_str())
        .param("region", self.region.as_str())
    }
}

/// Single title with credits, videos and recommendations appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsQuery {
    pub media_type: MediaType,
    pub id: MediaId,
    pub language: String,
}

impl DetailsQuery {
    pub fn to_upstream(&self) -> UpstreamRequest {
        UpstreamRequest::new([self.media_type.as_str(), self.id.as_ref()])
            .param("language", self.language.as_str())
            .param("append_to_response", DETAILS_APPENDED_RESOURCES)
    }
}

/// Trailers and backdrops for one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaQuery {
    pub media_type: MediaType,
    pub id: MediaId,
}

impl MediaQuery {
    pub fn videos_upstream(&self) -> UpstreamRequest {
        UpstreamRequest::new([self.media_type.as_str(), self.id.as_ref(), "videos"])
            .param("language", DEFAULT_LANGUAGE)
    }

    pub fn images_upstream(&self) -> UpstreamRequest {
        UpstreamRequest::new([self.media_type.as_str(), self.id.as_ref(), "images"])
    }
}

/// Curated media assets for a title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaAssets {
    pub trailers: Vec<Value>,
    pub backdrops: Vec<Value>,
}

impl MediaAssets {
    /// Keep YouTube trailers and teasers from a videos payload and the first
    /// [`MEDIA_BACKDROP_LIMIT`] backdrops from an images payload.
    pub fn from_payloads(videos: &Value, images: &Value) -> Self {
        let trailers = videos
            .get("results")
            .and_then(Value::as_array)
            .map(|results| results.iter().filter(|v| is_youtube_trailer(v)).cloned().collect())
            .unwrap_or_default();
        let backdrops = images
            .get("backdrops")
            .and_then(Value::as_array)
            .map(|items| items.iter().take(MEDIA_BACKDROP_LIMIT).cloned().collect())
            .unwrap_or_default();
        Self {
            trailers,
            backdrops,
        }
    }
}

fn is_youtube_trailer(video: &Value) -> bool {
    let site = video.get("site").and_then(Value::as_str);
    let kind = video.get("type").and_then(Value::as_str);
    site == Some("YouTube") && matches!(kind, Some("Trailer" | "Teaser"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn media_id(raw: &str) -> MediaId {
        MediaId::new(raw).expect("fixture media id")
    }

    #[rstest]
    #[case(MediaType::Movie, "year")]
    #[case(MediaType::Tv, "first_air_date_year")]
    fn search_maps_year_by_media_type(#[case] media_type: MediaType, #[case] key: &str) {
        let query = SearchQuery {
            media_type,
            query: "Inception".to_owned(),
            page: "2".to_owned(),
            language: "en-US".to_owned(),
            year: Some("2010".to_owned()),
        };

        let request = query.to_upstream();

        assert_eq!(request.path(), format!("/search/{media_type}"));
        assert_eq!(request.param_value(key), Some("2010"));
        assert_eq!(request.param_value("include_adult"), Some("false"));
        assert_eq!(request.param_value("page"), Some("2"));
    }

    #[rstest]
    #[case(MediaType::Movie, "primary_release_date.gte", "primary_release_date.lte")]
    #[case(MediaType::Tv, "first_air_date.gte", "first_air_date.lte")]
    fn discover_maps_date_range(
        #[case] media_type: MediaType,
        #[case] gte: &str,
        #[case] lte: &str,
    ) {
        let query = DiscoverQuery {
            media_type,
            language: DEFAULT_LANGUAGE.to_owned(),
            region: DEFAULT_REGION.to_owned(),
            include_adult: "false".to_owned(),
            sort_by: DEFAULT_SORT_BY.to_owned(),
            page: DEFAULT_PAGE.to_owned(),
            with_genres: Some("27".to_owned()),
            year: None,
            from_date: Some("2020-01-01".to_owned()),
            to_date: Some("2020-12-31".to_owned()),
        };

        let request = query.to_upstream();

        assert_eq!(request.param_value(gte), Some("2020-01-01"));
        assert_eq!(request.param_value(lte), Some("2020-12-31"));
        assert_eq!(request.param_value("with_genres"), Some("27"));
        assert_eq!(request.param_value(year_key(media_type)), None);
    }

    #[rstest]
    fn trending_builds_scoped_path() {
        let query = TrendingQuery {
            scope: TrendingScope::Tv,
            window: TimeWindow::Week,
            page: DEFAULT_PAGE.to_owned(),
            language: DEFAULT_LANGUAGE.to_owned(),
            region: DEFAULT_REGION.to_owned(),
        };
        assert_eq!(query.to_upstream().path(), "/trending/tv/week");
    }

    #[rstest]
    fn details_appends_related_resources() {
        let query = DetailsQuery {
            media_type: MediaType::Tv,
            id: media_id("1399"),
            language: "fr-FR".to_owned(),
        };
        let request = query.to_upstream();
        assert_eq!(request.path(), "/tv/1399");
        assert_eq!(request.segments, ["tv", "1399"]);
        assert_eq!(
            request.param_value("append_to_response"),
            Some("credits,videos,recommendations")
        );
        assert_eq!(request.param_value("language"), Some("fr-FR"));
    }

    #[rstest]
    fn media_assets_keep_youtube_trailers_and_cap_backdrops() {
        let videos = json!({"results": [
            {"site": "YouTube", "type": "Trailer", "key": "a"},
            {"site": "YouTube", "type": "Featurette", "key": "b"},
            {"site": "Vimeo", "type": "Trailer", "key": "c"},
            {"site": "YouTube", "type": "Teaser", "key": "d"},
        ]});
        let backdrops: Vec<Value> = (0..25).map(|i| json!({"file_path": format!("/{i}.jpg")})).collect();
        let images = json!({"backdrops": backdrops});

        let assets = MediaAssets::from_payloads(&videos, &images);

        let keys: Vec<_> = assets
            .trailers
            .iter()
            .filter_map(|v| v.get("key").and_then(Value::as_str))
            .collect();
        assert_eq!(keys, vec!["a", "d"]);
        assert_eq!(assets.backdrops.len(), MEDIA_BACKDROP_LIMIT);
    }

    #[rstest]
    fn media_assets_tolerate_missing_sections() {
        let assets = MediaAssets::from_payloads(&json!({}), &json!({"status_code": 34}));
        assert!(assets.trailers.is_empty());
        assert!(assets.backdrops.is_empty());
    }
}
