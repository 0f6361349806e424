//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! request/response DTOs and the error envelope, plus the bearer security
//! scheme used by authenticated routes. The document backs Swagger UI in
//! debug builds and is printed by the `openapi-dump` binary.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::alerts::{AlertsRequest, AlertsResponse};
use crate::inbound::http::comments::{CommentRequest, CommentResponse};
use crate::inbound::http::favorites::{
    FavoriteAddedResponse, FavoriteRequest, FavoriteResponse,
};
use crate::inbound::http::health::HelloResponse;
use crate::inbound::http::metadata::{MediaAssetsSchema, UpstreamPayloadSchema};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{OkResponse, ProfileRequest, ProfileResponse};

/// Adds the identity provider's bearer token scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Firebase ID token issued to the signed-in client."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Marquee backend API",
        description = "Metadata proxy and per-user favorites, alerts, comments and profile.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::hello,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::metadata::search,
        crate::inbound::http::metadata::discover,
        crate::inbound::http::metadata::trending,
        crate::inbound::http::metadata::details,
        crate::inbound::http::metadata::media,
        crate::inbound::http::users::bootstrap,
        crate::inbound::http::users::get_profile,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::favorites::list_favorites,
        crate::inbound::http::favorites::add_favorite,
        crate::inbound::http::favorites::remove_favorite,
        crate::inbound::http::alerts::get_alerts,
        crate::inbound::http::alerts::update_alerts,
        crate::inbound::http::comments::list_comments,
        crate::inbound::http::comments::add_comment,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        OkResponse,
        HelloResponse,
        UpstreamPayloadSchema,
        MediaAssetsSchema,
        ProfileRequest,
        ProfileResponse,
        FavoriteRequest,
        FavoriteResponse,
        FavoriteAddedResponse,
        AlertsRequest,
        AlertsResponse,
        CommentRequest,
        CommentResponse,
    )),
    tags(
        (name = "metadata", description = "Read-only proxy over the metadata provider"),
        (name = "users", description = "Caller bootstrap and profile"),
        (name = "favorites", description = "Per-user saved titles"),
        (name = "alerts", description = "Per-user notification settings"),
        (name = "comments", description = "Public remarks on titles"),
        (name = "health", description = "Probes and connectivity check")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    #[rstest]
    fn error_schema_uses_wire_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let RefOr::T(Schema::Object(error)) = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema")
        else {
            panic!("expected object schema");
        };
        for field in ["code", "message", "details", "traceId"] {
            assert!(error.properties.contains_key(field), "missing {field}");
        }
    }

    #[rstest]
    #[case("/api/search")]
    #[case("/api/favorites/{media_type}/{tmdb_id}")]
    #[case("/api/comments")]
    #[case("/health/ready")]
    fn routes_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "{path} missing");
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
    }

    #[rstest]
    fn comments_path_documents_both_methods() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/api/comments").expect("comments path");
        assert!(item.get.is_some());
        assert!(item.post.is_some());
    }
}
