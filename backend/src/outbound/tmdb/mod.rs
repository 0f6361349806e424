//! Metadata API outbound adapter.
//!
//! A thin reqwest implementation of the `MetadataSource` port that speaks the
//! TMDb v3 REST API.

mod http_source;

pub use http_source::{DEFAULT_TMDB_BASE_URL, TmdbHttpSource};
