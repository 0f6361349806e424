//! HTTP inbound adapter exposing REST endpoints.

pub mod alerts;
pub mod auth;
pub mod cache_control;
pub mod comments;
pub mod error;
pub mod favorites;
pub mod health;
pub mod metadata;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::{guard, web};

pub use error::ApiResult;

use self::auth::RequireIdentity;
use self::error::{json_error_handler, query_error_handler};

/// Register every `/api` route on `cfg`.
///
/// Expects `web::Data<HttpState>` on the app. Health probes are mounted
/// separately by the server because they read their own state.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use marquee::inbound::http::configure;
/// use marquee::inbound::http::state::{HttpState, HttpStatePorts};
///
/// let _app = App::new()
///     .app_data(web::Data::new(HttpState::new(HttpStatePorts::default())))
///     .configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .route("/api/hello", web::get().to(health::hello))
        .route("/api/search", web::get().to(metadata::search))
        .route("/api/discover", web::get().to(metadata::discover))
        .route("/api/trending", web::get().to(metadata::trending))
        .route("/api/details", web::get().to(metadata::details))
        .route("/api/media", web::get().to(metadata::media))
        .service(
            web::resource("/api/user/bootstrap")
                .route(web::post().to(users::bootstrap))
                .wrap(RequireIdentity),
        )
        .service(
            web::resource("/api/profile")
                .route(web::get().to(users::get_profile))
                .route(web::put().to(users::update_profile))
                .wrap(RequireIdentity),
        )
        .service(
            web::resource("/api/alerts")
                .route(web::get().to(alerts::get_alerts))
                .route(web::put().to(alerts::update_alerts))
                .wrap(RequireIdentity),
        )
        .service(
            web::resource("/api/favorites")
                .route(web::get().to(favorites::list_favorites))
                .route(web::post().to(favorites::add_favorite))
                .wrap(RequireIdentity),
        )
        .service(
            web::resource("/api/favorites/{media_type}/{tmdb_id}")
                .route(web::delete().to(favorites::remove_favorite))
                .wrap(RequireIdentity),
        )
        // Listing is public; the guarded resources let only POST pass the
        // identity stage.
        .service(
            web::resource("/api/comments")
                .guard(guard::Get())
                .route(web::get().to(comments::list_comments)),
        )
        .service(
            web::resource("/api/comments")
                .guard(guard::Post())
                .route(web::post().to(comments::add_comment))
                .wrap(RequireIdentity),
        );
}
