//! Metadata proxy service.
//!
//! Relays catalogue lookups to the upstream metadata API and classifies
//! failures: a missing credential is `service_unavailable`, upstream error
//! statuses become `upstream_error` carrying the status, and deadline
//! overruns become `upstream_timeout`.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::try_join;
use serde_json::{Value, json};
use tracing::warn;

use crate::domain::ports::{MetadataQuery, MetadataSource, MetadataSourceError};
use crate::domain::{
    DetailsQuery, DiscoverQuery, Error, MediaAssets, MediaQuery, SearchQuery, TrendingQuery,
    UpstreamRequest,
};

/// Message surfaced when the upstream credential is absent.
pub const METADATA_KEY_MISSING: &str = "TMDB_API_KEY missing";

#[derive(Clone)]
pub struct MetadataService<S> {
    source: Arc<S>,
}

impl<S> MetadataService<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

fn map_source_error(request: &UpstreamRequest, error: MetadataSourceError) -> Error {
    match error {
        MetadataSourceError::NotConfigured => Error::service_unavailable(METADATA_KEY_MISSING),
        MetadataSourceError::Status { status, message } => {
            warn!(path = %request, status, %message, "metadata upstream returned error status");
            Error::upstream("TMDb error").with_details(json!({ "upstream_status": status }))
        }
        MetadataSourceError::Timeout { message } => {
            warn!(path = %request, %message, "metadata upstream timed out");
            Error::upstream_timeout("TMDb request timed out")
        }
        MetadataSourceError::Transport { message } | MetadataSourceError::Decode { message } => {
            warn!(path = %request, %message, "metadata upstream failed");
            Error::upstream("TMDb request failed")
        }
    }
}

impl<S> MetadataService<S>
where
    S: MetadataSource,
{
    async fn relay(&self, request: UpstreamRequest) -> Result<Value, Error> {
        self.source
            .fetch(&request)
            .await
            .map_err(|err| map_source_error(&request, err))
    }
}

#[async_trait]
impl<S> MetadataQuery for MetadataService<S>
where
    S: MetadataSource,
{
    async fn search(&self, query: SearchQuery) -> Result<Value, Error> {
        self.relay(query.to_upstream()).await
    }

    async fn discover(&self, query: DiscoverQuery) -> Result<Value, Error> {
        self.relay(query.to_upstream()).await
    }

    async fn trending(&self, query: TrendingQuery) -> Result<Value, Error> {
        self.relay(query.to_upstream()).await
    }

    async fn details(&self, query: DetailsQuery) -> Result<Value, Error> {
        self.relay(query.to_upstream()).await
    }

    async fn media(&self, query: MediaQuery) -> Result<MediaAssets, Error> {
        let (videos, images) = try_join(
            self.relay(query.videos_upstream()),
            self.relay(query.images_upstream()),
        )
        .await?;
        Ok(MediaAssets::from_payloads(&videos, &images))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockMetadataSource;
    use crate::domain::{
        DEFAULT_LANGUAGE, DEFAULT_PAGE, ErrorCode, MediaId, MediaType, TimeWindow, TrendingScope,
    };
    use rstest::rstest;

    fn search_query() -> SearchQuery {
        SearchQuery {
            media_type: MediaType::Movie,
            query: "inception".to_owned(),
            page: DEFAULT_PAGE.to_owned(),
            language: DEFAULT_LANGUAGE.to_owned(),
            year: None,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn search_relays_upstream_body() {
        let mut source = MockMetadataSource::new();
        source
            .expect_fetch()
            .withf(|request| {
                request.path() == "/search/movie" && request.param_value("query") == Some("inception")
            })
            .times(1)
            .return_once(|_| Ok(json!({ "results": [] })));

        let service = MetadataService::new(Arc::new(source));
        let body = service.search(search_query()).await.expect("relayed");

        assert_eq!(body, json!({ "results": [] }));
    }

    #[rstest]
    #[tokio::test]
    async fn trending_uses_scope_and_window_in_path() {
        let mut source = MockMetadataSource::new();
        source
            .expect_fetch()
            .withf(|request| request.path() == "/trending/tv/week")
            .times(1)
            .return_once(|_| Ok(json!({ "page": 1 })));

        let service = MetadataService::new(Arc::new(source));
        service
            .trending(TrendingQuery {
                scope: TrendingScope::Tv,
                window: TimeWindow::Week,
                page: DEFAULT_PAGE.to_owned(),
                language: DEFAULT_LANGUAGE.to_owned(),
                region: "GB".to_owned(),
            })
            .await
            .expect("relayed");
    }

    #[rstest]
    #[case(MetadataSourceError::not_configured(), ErrorCode::ServiceUnavailable)]
    #[case(MetadataSourceError::status(404_u16, "missing"), ErrorCode::UpstreamError)]
    #[case(MetadataSourceError::timeout("10s elapsed"), ErrorCode::UpstreamTimeout)]
    #[case(MetadataSourceError::transport("reset"), ErrorCode::UpstreamError)]
    #[case(MetadataSourceError::decode("not json"), ErrorCode::UpstreamError)]
    #[tokio::test]
    async fn classifies_source_failures(
        #[case] failure: MetadataSourceError,
        #[case] expected: ErrorCode,
    ) {
        let mut source = MockMetadataSource::new();
        source.expect_fetch().times(1).return_once(move |_| Err(failure));

        let service = MetadataService::new(Arc::new(source));
        let error = service.search(search_query()).await.expect_err("fails");

        assert_eq!(error.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_key_uses_stable_message() {
        let mut source = MockMetadataSource::new();
        source
            .expect_fetch()
            .times(1)
            .return_once(|_| Err(MetadataSourceError::not_configured()));

        let service = MetadataService::new(Arc::new(source));
        let error = service.search(search_query()).await.expect_err("fails");

        assert_eq!(error.message(), METADATA_KEY_MISSING);
    }

    #[rstest]
    #[tokio::test]
    async fn upstream_status_is_reported_in_details() {
        let mut source = MockMetadataSource::new();
        source
            .expect_fetch()
            .times(1)
            .return_once(|_| Err(MetadataSourceError::status(401_u16, "bad key")));

        let service = MetadataService::new(Arc::new(source));
        let error = service.search(search_query()).await.expect_err("fails");

        assert_eq!(error.details(), Some(&json!({ "upstream_status": 401 })));
    }

    #[rstest]
    #[tokio::test]
    async fn media_combines_videos_and_images() {
        let mut source = MockMetadataSource::new();
        source.expect_fetch().times(2).returning(|request| {
            if request.segments.last().map(String::as_str) == Some("videos") {
                Ok(json!({ "results": [
                    { "site": "YouTube", "type": "Trailer", "key": "a" },
                    { "site": "Vimeo", "type": "Trailer", "key": "b" },
                    { "site": "YouTube", "type": "Featurette", "key": "c" }
                ]}))
            } else {
                Ok(json!({ "backdrops": [{ "file_path": "/x.jpg" }] }))
            }
        });

        let service = MetadataService::new(Arc::new(source));
        let assets = service
            .media(MediaQuery {
                media_type: MediaType::Movie,
                id: MediaId::new("27205").expect("media id"),
            })
            .await
            .expect("assets");

        assert_eq!(assets.trailers.len(), 1);
        assert_eq!(assets.backdrops.len(), 1);
    }
}
