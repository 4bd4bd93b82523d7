//! End-to-end exchange flow against store/client doubles.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower::ServiceExt;

use tunesort::auth::jwt::JwtKeys;
use tunesort::spotify::dto::Profile;

mod common;
use common::{alice_profile, create_test_app, MemUserStore, MockSpotify, TEST_JWT_SECRET};

fn auth_code_request(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/auth/code")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn first_exchange_creates_account_with_session_token() {
    let users = Arc::new(MemUserStore::default());
    let spotify = Arc::new(MockSpotify::new("tok1", alice_profile()));
    let app = create_test_app(users.clone(), spotify.clone());

    let response = app
        .oneshot(auth_code_request(r#"{"code":"abc123"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["user"]["email"], "a@b.com");
    assert_eq!(body["user"]["name"], "Alice");
    assert_eq!(body["user"]["id"], "sp123");

    // The returned access_token is the application session token, a JWT
    // signed with the configured secret.
    let session_token = body["user"]["access_token"].as_str().unwrap();
    let claims = JwtKeys::new(TEST_JWT_SECRET)
        .verify(session_token)
        .expect("session token should verify");
    assert_eq!(claims.sub, "a@b.com");

    assert_eq!(users.row_count(), 1);
    let stored = users.get_by_email("a@b.com").unwrap();
    assert_eq!(stored.session_token, session_token);
    assert_eq!(stored.access_token, "tok1");
    assert_eq!(spotify.exchange_calls.load(Ordering::SeqCst), 1);
    assert_eq!(spotify.profile_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn repeat_exchange_updates_in_place() {
    let users = Arc::new(MemUserStore::default());
    let spotify = Arc::new(MockSpotify::new("tok1", alice_profile()));
    let app = create_test_app(users.clone(), spotify.clone());

    let first = app
        .clone()
        .oneshot(auth_code_request(r#"{"code":"abc123"}"#))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first_body = json_body(first).await;
    let first_session = first_body["user"]["access_token"].as_str().unwrap().to_string();
    let first_id = users.get_by_email("a@b.com").unwrap().id;

    // Same user comes back from Germany with a fresh Spotify token.
    spotify.set_grant("tok2");
    spotify.set_profile(Profile {
        country: "DE".into(),
        ..alice_profile()
    });

    let second = app
        .clone()
        .oneshot(auth_code_request(r#"{"code":"def456"}"#))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    let second_body = json_body(second).await;

    assert_eq!(users.row_count(), 1, "no second row for the same email");
    let stored = users.get_by_email("a@b.com").unwrap();
    assert_eq!(stored.id, first_id, "row id unchanged on update");
    assert_eq!(stored.country, "DE");
    assert_eq!(stored.access_token, "tok2");
    assert_eq!(
        stored.session_token, first_session,
        "session token survives repeat exchanges"
    );
    assert_eq!(second_body["user"]["access_token"], first_session.as_str());
}

#[tokio::test]
async fn account_fields_equal_profile_fixture() {
    let users = Arc::new(MemUserStore::default());
    let spotify = Arc::new(MockSpotify::new("tok1", alice_profile()));
    let app = create_test_app(users.clone(), spotify);

    let response = app
        .oneshot(auth_code_request(r#"{"code":"abc123"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fixture = alice_profile();
    let stored = users.get_by_email("a@b.com").unwrap();
    assert_eq!(stored.email, fixture.email);
    assert_eq!(stored.name, fixture.display_name);
    assert_eq!(stored.country, fixture.country);
    assert_eq!(stored.product, fixture.product);
    assert_eq!(stored.spotify_id, fixture.id);
    assert_eq!(stored.href, fixture.href);
    assert_eq!(stored.uri, fixture.uri);
}

#[tokio::test]
async fn malformed_json_yields_error_envelope() {
    let users = Arc::new(MemUserStore::default());
    let spotify = Arc::new(MockSpotify::new("tok1", alice_profile()));
    let app = create_test_app(users, spotify.clone());

    let response = app
        .oneshot(auth_code_request(r#"{"code": 12"#))
        .await
        .unwrap();
    // Client errors ride the generic envelope on 200, not axum's rejection.
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "Error");
    assert_eq!(spotify.exchange_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_code_is_rejected_before_the_exchange() {
    let users = Arc::new(MemUserStore::default());
    let spotify = Arc::new(MockSpotify::new("tok1", alice_profile()));
    let app = create_test_app(users, spotify.clone());

    let response = app
        .oneshot(auth_code_request(r#"{"code":"  "}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "Error");
    assert_eq!(body["error"], "code is required");
    assert_eq!(spotify.exchange_calls.load(Ordering::SeqCst), 0);
}
