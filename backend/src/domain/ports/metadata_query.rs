//! Driving port for the metadata proxy endpoints.
//!
//! Each method relays the upstream payload on success. Failures arrive as
//! domain errors already classified as configuration, upstream status, or
//! timeout problems.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{
    DetailsQuery, DiscoverQuery, Error, METADATA_KEY_MISSING, MediaAssets, MediaQuery,
    SearchQuery, TrendingQuery,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataQuery: Send + Sync {
    async fn search(&self, query: SearchQuery) -> Result<Value, Error>;

    async fn discover(&self, query: DiscoverQuery) -> Result<Value, Error>;

    async fn trending(&self, query: TrendingQuery) -> Result<Value, Error>;

    async fn details(&self, query: DetailsQuery) -> Result<Value, Error>;

    async fn media(&self, query: MediaQuery) -> Result<MediaAssets, Error>;
}

/// Fixture query reporting the proxy as unconfigured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMetadataQuery;

fn unconfigured() -> Error {
    Error::service_unavailable(METADATA_KEY_MISSING)
}

#[async_trait]
impl MetadataQuery for FixtureMetadataQuery {
    async fn search(&self, _query: SearchQuery) -> Result<Value, Error> {
        Err(unconfigured())
    }

    async fn discover(&self, _query: DiscoverQuery) -> Result<Value, Error> {
        Err(unconfigured())
    }

    async fn trending(&self, _query: TrendingQuery) -> Result<Value, Error> {
        Err(unconfigured())
    }

    async fn details(&self, _query: DetailsQuery) -> Result<Value, Error> {
        Err(unconfigured())
    }

    async fn media(&self, _query: MediaQuery) -> Result<MediaAssets, Error> {
        Err(unconfigured())
    }
}
