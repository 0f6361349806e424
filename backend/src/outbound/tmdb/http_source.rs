//! Reqwest-backed TMDb source adapter.
//!
//! Owns transport details only: URL assembly with the credential, the
//! request timeout, status mapping and JSON decoding. The credential is
//! appended as the `api_key` query parameter and never logged.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use zeroize::Zeroizing;

use crate::domain::UpstreamRequest;
use crate::domain::ports::{MetadataSource, MetadataSourceError};

/// Public TMDb v3 endpoint.
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

const API_KEY_PARAM: &str = "api_key";

/// Metadata source that issues GET requests against one TMDb base URL.
pub struct TmdbHttpSource {
    client: Client,
    base_url: Url,
    api_key: Option<Zeroizing<String>>,
}

impl TmdbHttpSource {
    /// Build an adapter whose requests abort after `timeout`.
    ///
    /// A missing or blank `api_key` is accepted; every fetch then reports
    /// [`MetadataSourceError::NotConfigured`] without touching the network.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        let api_key = api_key
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty())
            .map(Zeroizing::new);
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Whether a credential was supplied.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl MetadataSource for TmdbHttpSource {
    async fn fetch(&self, request: &UpstreamRequest) -> Result<Value, MetadataSourceError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(MetadataSourceError::not_configured)?;
        let url = build_url(&self.base_url, request, api_key)?;

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        serde_json::from_slice(body.as_ref()).map_err(|error| {
            MetadataSourceError::decode(format!("invalid TMDb JSON payload: {error}"))
        })
    }
}

fn build_url(
    base_url: &Url,
    request: &UpstreamRequest,
    api_key: &str,
) -> Result<Url, MetadataSourceError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| MetadataSourceError::transport("invalid TMDb base URL"))?
        .pop_if_empty()
        .extend(&request.segments);
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair(API_KEY_PARAM, api_key);
        for (key, value) in &request.params {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

fn map_transport_error(error: reqwest::Error) -> MetadataSourceError {
    // reqwest includes the URL, and therefore the credential, in its Display.
    let error = error.without_url();
    if error.is_timeout() {
        MetadataSourceError::timeout(error.to_string())
    } else {
        MetadataSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> MetadataSourceError {
    MetadataSourceError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
        format!("{preview}...")
    } else {
        compact
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network TMDb mapping helpers.

    use super::*;
    use crate::domain::{DEFAULT_LANGUAGE, DEFAULT_PAGE, DetailsQuery, MediaId, MediaType, SearchQuery};
    use rstest::rstest;

    fn base() -> Url {
        Url::parse(DEFAULT_TMDB_BASE_URL).expect("valid base url")
    }

    fn search() -> UpstreamRequest {
        SearchQuery {
            media_type: MediaType::Tv,
            query: "the wire".to_owned(),
            page: DEFAULT_PAGE.to_owned(),
            language: DEFAULT_LANGUAGE.to_owned(),
            year: Some("2002".to_owned()),
        }
        .to_upstream()
    }

    #[rstest]
    #[case("https://api.themoviedb.org/3")]
    #[case("https://api.themoviedb.org/3/")]
    fn keeps_base_path_prefix(#[case] raw_base: &str) {
        let base = Url::parse(raw_base).expect("valid base");
        let url = build_url(&base, &search(), "k").expect("url builds");
        assert_eq!(url.path(), "/3/search/tv");
    }

    #[rstest]
    #[case("../../configuration#")]
    #[case("1?append_to_response=x")]
    #[case("..")]
    fn caller_segments_cannot_leave_the_title_path(#[case] id: &str) {
        let request = DetailsQuery {
            media_type: MediaType::Movie,
            id: MediaId::new(id).expect("non-empty id"),
            language: DEFAULT_LANGUAGE.to_owned(),
        }
        .to_upstream();

        let url = build_url(&base(), &request, "secret").expect("url builds");

        assert!(url.path().starts_with("/3/movie"), "{}", url.path());
        assert_eq!(url.fragment(), None);
        assert_eq!(url.query_pairs().filter(|(key, _)| key == "append_to_response").count(), 1);
    }

    #[rstest]
    fn encodes_separators_inside_a_segment() {
        let request = DetailsQuery {
            media_type: MediaType::Movie,
            id: MediaId::new("../../configuration#").expect("non-empty id"),
            language: DEFAULT_LANGUAGE.to_owned(),
        }
        .to_upstream();

        let url = build_url(&base(), &request, "secret").expect("url builds");

        assert_eq!(url.path(), "/3/movie/..%2F..%2Fconfiguration%23");
    }

    #[rstest]
    fn appends_credential_and_parameters() {
        let url = build_url(&base(), &search(), "secret").expect("url builds");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(pairs[0], ("api_key".to_owned(), "secret".to_owned()));
        assert!(pairs.contains(&("query".to_owned(), "the wire".to_owned())));
        assert!(pairs.contains(&("first_air_date_year".to_owned(), "2002".to_owned())));
    }

    #[rstest]
    #[case(StatusCode::NOT_FOUND)]
    #[case(StatusCode::UNAUTHORIZED)]
    #[case(StatusCode::SERVICE_UNAVAILABLE)]
    fn non_success_statuses_keep_the_code(#[case] status: StatusCode) {
        let error = map_status_error(status, b"{\"status_message\": \"nope\"}");
        assert!(matches!(
            error,
            MetadataSourceError::Status { status: code, .. } if code == status.as_u16()
        ));
    }

    #[rstest]
    fn body_preview_is_compacted_and_bounded() {
        let body = format!("a  b\n{}", "c".repeat(400));
        let preview = body_preview(body.as_bytes());
        assert!(preview.starts_with("a b "));
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("   ".to_owned()))]
    #[tokio::test]
    async fn missing_credential_short_circuits(#[case] api_key: Option<String>) {
        let source =
            TmdbHttpSource::new(base(), api_key, Duration::from_secs(1)).expect("client builds");
        assert!(!source.is_configured());

        let error = source.fetch(&search()).await.expect_err("not configured");
        assert_eq!(error, MetadataSourceError::NotConfigured);
    }
}
