//! Backend entry-point: loads settings, wires adapters and serves HTTP.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultClock;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use marquee::domain::MetadataService;
use marquee::domain::ports::{IdentityVerifier, MetadataQuery};
use marquee::inbound::http::health::HealthState;
use marquee::outbound::identity::{FirebaseIdentityVerifier, FirebaseSettings};
use marquee::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use marquee::outbound::tmdb::TmdbHttpSource;
use ortho_config::OrthoConfig;
use server::{AppSettings, ServerConfig, create_server};

fn build_metadata(settings: &AppSettings) -> Result<Arc<dyn MetadataQuery>> {
    let base_url = settings
        .tmdb_base_url()
        .wrap_err("metadata settings")?;
    let source = TmdbHttpSource::new(
        base_url,
        settings.tmdb_api_key().map(str::to_owned),
        settings.tmdb_timeout(),
    )
    .wrap_err("build metadata client")?;
    if !source.is_configured() {
        warn!("MARQUEE_TMDB_API_KEY not set; metadata routes will answer 503");
    }
    Ok(Arc::new(MetadataService::new(Arc::new(source))))
}

fn build_identity_verifier(settings: &AppSettings) -> Result<Arc<dyn IdentityVerifier>> {
    let jwks_url = settings
        .firebase_jwks_url()
        .wrap_err("identity settings")?;
    let verifier = FirebaseIdentityVerifier::new(
        FirebaseSettings {
            project_id: settings.firebase_project_id().map(str::to_owned),
            jwks_url,
            timeout: settings.identity_timeout(),
        },
        Arc::new(DefaultClock),
    )
    .wrap_err("build identity client")?;
    if !verifier.is_configured() {
        warn!(
            "MARQUEE_FIREBASE_PROJECT_ID not set; authenticated routes will answer 503"
        );
    }
    Ok(Arc::new(verifier))
}

async fn build_pool(settings: &AppSettings) -> Result<Option<DbPool>> {
    let Some(database_url) = settings.database_url() else {
        warn!("MARQUEE_DATABASE_URL not set; user state is kept in memory and lost on restart");
        return Ok(None);
    };
    run_pending_migrations(database_url)
        .await
        .wrap_err("apply migrations")?;
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await
    .wrap_err("create database pool")?;
    Ok(Some(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("load settings")?;
    let bind_addr = settings
        .bind_addr()
        .wrap_err("server settings")?;

    let mut config = ServerConfig::new(
        bind_addr,
        build_identity_verifier(&settings)?,
        build_metadata(&settings)?,
    );
    if let Some(pool) = build_pool(&settings).await? {
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("bind HTTP server")?;
    info!(%bind_addr, "marquee listening");
    server.await.wrap_err("HTTP server terminated")
}
