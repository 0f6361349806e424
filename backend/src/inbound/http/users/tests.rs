//! Tests for the bootstrap and profile handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, CACHE_CONTROL};
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::SubjectId;
use crate::domain::ports::{CommentsCommand, UserProfileQuery};
use crate::domain::{CommentContent, MediaId, MediaRef, MediaType};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::test_utils::{bearer_header, in_memory_state};
use crate::outbound::memory::InMemoryUserStore;

async fn send(state: HttpState, request: test::TestRequest) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure),
    )
    .await;
    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

fn authed(request: test::TestRequest, subject: &str) -> test::TestRequest {
    request.insert_header((AUTHORIZATION, bearer_header(subject)))
}

#[rstest]
#[actix_web::test]
async fn bootstrap_creates_the_local_user() {
    let store = Arc::new(InMemoryUserStore::default());
    let state = in_memory_state(Arc::clone(&store));

    let (status, body) = send(
        state.clone(),
        authed(test::TestRequest::post().uri("/api/user/bootstrap"), "ada"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true}));
    let subject = SubjectId::new("ada").expect("subject");
    let profile = state.profile.fetch_profile(&subject).await.expect("stored");
    assert_eq!(profile.email.as_deref(), Some("ada@example.com"));
}

#[rstest]
#[actix_web::test]
async fn bootstrap_requires_a_bearer_token() {
    let state = in_memory_state(Arc::new(InMemoryUserStore::default()));

    let (status, body) = send(state, test::TestRequest::post().uri("/api/user/bootstrap")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Missing Authorization Bearer token");
}

#[rstest]
#[actix_web::test]
async fn profile_round_trip_uses_wire_field_names() {
    let state = in_memory_state(Arc::new(InMemoryUserStore::default()));

    let (status, body) = send(
        state.clone(),
        authed(test::TestRequest::put().uri("/api/profile"), "ada").set_json(json!({
            "display_name": "Ada Lovelace",
            "photo_url": "https://example.com/ada.png"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true}));

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure),
    )
    .await;
    let response = test::call_service(
        &app,
        authed(test::TestRequest::get().uri("/api/profile"), "ada").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(CACHE_CONTROL));
    let profile: Value = test::read_body_json(response).await;
    assert_eq!(profile["uid"], "ada");
    assert_eq!(profile["email"], "ada@example.com");
    assert_eq!(profile["photo_url"], "https://example.com/ada.png");
    assert!(profile["created_at"].is_string());
}

#[rstest]
#[actix_web::test]
async fn profile_update_truncates_display_name() {
    let state = in_memory_state(Arc::new(InMemoryUserStore::default()));

    let (status, _) = send(
        state.clone(),
        authed(test::TestRequest::put().uri("/api/profile"), "ada")
            .set_json(json!({ "display_name": "n".repeat(250) })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let subject = SubjectId::new("ada").expect("subject");
    let profile = state.profile.fetch_profile(&subject).await.expect("stored");
    assert_eq!(profile.display_name.map(|name| name.chars().count()), Some(200));
}

#[rstest]
#[actix_web::test]
async fn profile_update_leaves_comment_authors_alone() {
    let state = in_memory_state(Arc::new(InMemoryUserStore::default()));
    send(
        state.clone(),
        authed(test::TestRequest::post().uri("/api/user/bootstrap"), "ada"),
    )
    .await;
    let subject = SubjectId::new("ada").expect("subject");
    let author = state.profile.fetch_profile(&subject).await.expect("stored");
    let media = MediaRef::new(MediaType::Movie, MediaId::new("27205").expect("media id"));
    state
        .comments
        .add(&author, media, CommentContent::new("great").expect("content"))
        .await
        .expect("comment stored");

    send(
        state.clone(),
        authed(test::TestRequest::put().uri("/api/profile"), "ada")
            .set_json(json!({ "display_name": "Countess" })),
    )
    .await;

    let (_, comments) = send(
        state,
        test::TestRequest::get().uri("/api/comments?media_type=movie&tmdb_id=27205"),
    )
    .await;
    assert_eq!(comments[0]["author_name"], "ada@example.com");
}
