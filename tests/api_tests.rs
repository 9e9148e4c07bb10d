mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{spawn_app, token_for, StubGeocoder};

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app(None, StubGeocoder::failing()).await;
    let (status, body) = app.get("/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "in_memory");
}

#[tokio::test]
async fn test_role_catalog_is_public() {
    let app = spawn_app(None, StubGeocoder::failing()).await;
    let (status, body) = app.get("/api/roles", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["roles"][0]["role"], "customer");
    assert_eq!(body["data"]["roles"][0]["call_to_action"], "Continue as Customer");
    assert_eq!(body["data"]["roles"][1]["role"], "mechanic");
}

#[tokio::test]
async fn test_profile_requires_bearer_token() {
    let app = spawn_app(None, StubGeocoder::failing()).await;

    let (status, body) = app.get("/api/profile/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, body) = app.get("/api/profile/me", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "JWT_ERROR");
}

#[tokio::test]
async fn test_profile_me() {
    let app = spawn_app(None, StubGeocoder::failing()).await;
    let (status, body) = app.get("/api/profile/me", Some(&app.customer_token())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "customer");
    assert_eq!(body["data"]["role_label"], "Customer");
    assert_eq!(body["data"]["display_name"], "Casey Driver");
}

#[tokio::test]
async fn test_profile_me_unknown_user() {
    let app = spawn_app(None, StubGeocoder::failing()).await;
    let token = token_for(uuid::Uuid::new_v4());
    let (status, _) = app.get("/api/profile/me", Some(&token)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_directory_excludes_unavailable_and_unlocated() {
    let app = spawn_app(None, StubGeocoder::failing()).await;
    let (status, body) = app.get("/api/mechanics", Some(&app.customer_token())).await;

    assert_eq!(status, StatusCode::OK);
    let mechanics = body["data"].as_array().unwrap();
    assert_eq!(mechanics.len(), app.listed_mechanics);

    let mut names: Vec<&str> = mechanics
        .iter()
        .map(|m| m["display_name"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Bo Li", "Quick Fix"]);

    for mechanic in mechanics {
        assert!(mechanic["latitude"].is_number());
        assert!(mechanic["longitude"].is_number());
    }
}

#[tokio::test]
async fn test_mechanic_toggles_availability_into_directory() {
    let app = spawn_app(None, StubGeocoder::failing()).await;
    let token = app.mechanic_token();

    let (status, body) = app
        .send(
            Method::PATCH,
            "/api/mechanics/me/availability",
            Some(&token),
            Some(json!({ "is_available": true, "latitude": 40.73, "longitude": -74.02 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["listed"], true);

    let (_, body) = app.get("/api/mechanics", Some(&token)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), app.listed_mechanics + 1);

    let (status, body) = app
        .send(
            Method::PATCH,
            "/api/mechanics/me/availability",
            Some(&token),
            Some(json!({ "is_available": false })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["listed"], false);
    assert_eq!(body["data"]["latitude"], 40.73);

    let (_, body) = app.get("/api/mechanics", Some(&token)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), app.listed_mechanics);
}

#[tokio::test]
async fn test_customer_cannot_set_availability() {
    let app = spawn_app(None, StubGeocoder::failing()).await;
    let (status, body) = app
        .send(
            Method::PATCH,
            "/api/mechanics/me/availability",
            Some(&app.customer_token()),
            Some(json!({ "is_available": true })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_availability_rejects_half_coordinates() {
    let app = spawn_app(None, StubGeocoder::failing()).await;
    let (status, body) = app
        .send(
            Method::PATCH,
            "/api/mechanics/me/availability",
            Some(&app.mechanic_token()),
            Some(json!({ "is_available": true, "latitude": 40.0 })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_blank_title_or_description_never_reaches_store() {
    let app = spawn_app(Some("pk.test"), StubGeocoder::succeeding("1 Main St")).await;
    let token = app.customer_token();

    for form in [
        json!({ "title": "", "description": "Rear left tire" }),
        json!({ "title": "Flat tire", "description": "   " }),
    ] {
        let (status, body) = app.post("/api/service-requests", Some(&token), form).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    assert_eq!(app.backend.service_request_count().await, 0);
    assert_eq!(app.geocoder.call_count(), 0);
}

#[tokio::test]
async fn test_submit_without_location_fails_with_generic_toast() {
    let app = spawn_app(Some("pk.test"), StubGeocoder::succeeding("1 Main St")).await;

    // Sin dashboard montado no hay lectura de ubicación
    let (status, body) = app
        .post(
            "/api/service-requests",
            Some(&app.customer_token()),
            json!({ "title": "Engine trouble", "description": "Smoke from the hood" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["toast"]["title"], "Error");
    assert_eq!(body["data"]["toast"]["description"], "Failed to submit service request");
    assert_eq!(body["data"]["toast"]["variant"], "destructive");
    assert_eq!(body["data"]["request_form_open"], true);
    assert_eq!(app.backend.service_request_count().await, 0);
    assert_eq!(app.geocoder.call_count(), 0);
}

#[tokio::test]
async fn test_mechanic_cannot_submit_requests() {
    let app = spawn_app(None, StubGeocoder::failing()).await;
    let (status, _) = app
        .post(
            "/api/service-requests",
            Some(&app.mechanic_token()),
            json!({ "title": "Flat tire", "description": "Rear left" }),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(app.backend.service_request_count().await, 0);
}

#[tokio::test]
async fn test_service_request_list_starts_empty() {
    let app = spawn_app(None, StubGeocoder::failing()).await;
    let (status, body) = app.get("/api/service-requests", Some(&app.customer_token())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}
