//! Application settings loaded via OrthoConfig.
//!
//! Values come from `MARQUEE_*` environment variables, configuration files or
//! command-line flags, and are read once at start-up.

use std::net::SocketAddr;
use std::time::Duration;

use marquee::outbound::identity::DEFAULT_FIREBASE_JWKS_URL;
use marquee::outbound::tmdb::DEFAULT_TMDB_BASE_URL;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_TMDB_TIMEOUT_SECS: u64 = 10;
const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 5;

/// Errors raised when a configured value cannot be interpreted.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid {field} URL {value:?}: {source}")]
    Url {
        field: &'static str,
        value: String,
        source: url::ParseError,
    },
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MARQUEE")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Postgres URL; fixture adapters are wired when absent.
    pub database_url: Option<String>,
    pub db_max_connections: Option<u32>,
    /// Metadata API key; proxy routes answer 503 when absent.
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: Option<String>,
    pub tmdb_timeout_secs: Option<u64>,
    /// Firebase project; authenticated routes answer 503 when absent.
    pub firebase_project_id: Option<String>,
    pub firebase_jwks_url: Option<String>,
    pub identity_timeout_secs: Option<u64>,
}

fn parse_url(field: &'static str, value: Option<&str>, default: &str) -> Result<Url, SettingsError> {
    let raw = value.unwrap_or(default);
    Url::parse(raw).map_err(|source| SettingsError::Url {
        field,
        value: raw.to_owned(),
        source,
    })
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|raw| raw.trim()).filter(|raw| !raw.is_empty())
}

impl AppSettings {
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    pub fn database_url(&self) -> Option<&str> {
        non_blank(self.database_url.as_ref())
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    pub fn tmdb_api_key(&self) -> Option<&str> {
        non_blank(self.tmdb_api_key.as_ref())
    }

    /// # Errors
    ///
    /// Returns [`SettingsError::Url`] when the override is not a URL.
    pub fn tmdb_base_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "tmdb_base_url",
            self.tmdb_base_url.as_deref(),
            DEFAULT_TMDB_BASE_URL,
        )
    }

    pub fn tmdb_timeout(&self) -> Duration {
        Duration::from_secs(self.tmdb_timeout_secs.unwrap_or(DEFAULT_TMDB_TIMEOUT_SECS))
    }

    pub fn firebase_project_id(&self) -> Option<&str> {
        non_blank(self.firebase_project_id.as_ref())
    }

    /// # Errors
    ///
    /// Returns [`SettingsError::Url`] when the override is not a URL.
    pub fn firebase_jwks_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "firebase_jwks_url",
            self.firebase_jwks_url.as_deref(),
            DEFAULT_FIREBASE_JWKS_URL,
        )
    }

    pub fn identity_timeout(&self) -> Duration {
        Duration::from_secs(
            self.identity_timeout_secs
                .unwrap_or(DEFAULT_IDENTITY_TIMEOUT_SECS),
        )
    }
}
