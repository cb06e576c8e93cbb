//! Access guard and input validation at the HTTP layer.
//!
//! Every request here is rejected before any data access, so the app runs
//! on a lazily-connected pool and no database is needed.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_with_authorization, lazy_pool, post_json, post_json_auth,
    token_for,
};
use chrono::Duration;
use prodboard_api::auth::jwt::{generate_access_token, JwtConfig};
use uuid::Uuid;

fn app() -> axum::Router {
    common::build_test_app(lazy_pool())
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    for uri in [
        "/api/v1/queries/mine",
        "/api/v1/recommendations/mine",
        "/api/v1/recommendations/for-me",
    ] {
        let response = get(app(), uri).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn create_query_without_token_is_rejected() {
    let body = serde_json::json!({
        "product_name": "Phone",
        "product_brand": "Acme",
        "query_title": "Alternatives?",
    });
    let response = post_json(app(), "/api/v1/queries", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_authorization_header_is_rejected() {
    for value in ["Token abc", "Bearer ", "bearer abc"] {
        let response = get_with_authorization(app(), "/api/v1/queries/mine", value).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{value}");
    }
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let foreign = JwtConfig {
        secret: "some-other-secret".into(),
        leeway_secs: 0,
    };
    let token =
        generate_access_token("a@x.com", None, Duration::minutes(15), &foreign).unwrap();

    let response = delete_auth(
        app(),
        &format!("/api/v1/recommendations/{}", Uuid::new_v4()),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let token = generate_access_token(
        "a@x.com",
        None,
        Duration::minutes(-5),
        &common::test_jwt_config(),
    )
    .unwrap();

    let response = common::get_auth(app(), "/api/v1/queries/mine", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_query_body_is_a_validation_error() {
    let body = serde_json::json!({
        "product_name": "",
        "product_brand": "Acme",
        "query_title": "Alternatives?",
    });
    let response = post_json_auth(app(), "/api/v1/queries", body, &token_for("a@x.com")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn invalid_recommendation_body_is_a_validation_error() {
    let body = serde_json::json!({
        "query_id": Uuid::new_v4(),
        "title": "Try this",
        "recommended_product": "Other",
        "reason": "",
    });
    let response =
        post_json_auth(app(), "/api/v1/recommendations", body, &token_for("b@x.com")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bookmark_for_someone_else_is_forbidden() {
    let body = serde_json::json!({
        "user_email": "victim@x.com",
        "query_ids": [Uuid::new_v4()],
    });
    let response = post_json_auth(app(), "/api/v1/bookmarks", body, &token_for("a@x.com")).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn bookmark_with_bad_token_is_rejected_even_though_route_is_open() {
    let body = serde_json::json!({
        "user_email": "a@x.com",
        "query_ids": [Uuid::new_v4()],
    });
    let response = post_json_auth(app(), "/api/v1/bookmarks", body, "garbage").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bookmark_with_empty_id_list_is_a_validation_error() {
    let body = serde_json::json!({ "user_email": "a@x.com", "query_ids": [] });
    let response = post_json(app(), "/api/v1/bookmarks", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bookmark_listing_without_email_is_a_bad_request() {
    let response = get(app(), "/api/v1/bookmarks/queries").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = get(app(), "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let response = get(app(), "/api/v1/queries/mine").await;
    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("response must carry x-request-id");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}
