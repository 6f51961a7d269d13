//! HTTP-level tests
//!
//! The router is driven in-process against a fake service whose answers
//! depend on the slugs it receives, so each error kind can be provoked
//! without a database.

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use segmenter_api::{config::HttpConfig, routes::create_router, AppState};
use segmenter_domain::segment::{
    ChangeSummary, Segment, SegmentError, SegmentServicePort, Slug, UserId,
};
use serde_json::{json, Value};
use tower::ServiceExt;

const USER: &str = "550e8400-e29b-41d4-a716-446655440000";

/// Fake service keyed on magic slugs:
/// - `taken` / `dup*` conflict
/// - `ghost*` don't exist
/// - `boom` fails internally
/// - `panic` panics inside the handler
struct FakeService;

impl SegmentServicePort for FakeService {
    async fn create_segment(&self, slug: String) -> Result<Segment, SegmentError> {
        match slug.as_str() {
            "taken" => Err(SegmentError::SlugTaken(slug)),
            "boom" => Err(SegmentError::internal(
                "create_segment",
                "error communicating with database: connection refused (10.0.0.7:5432)",
            )),
            "panic" => panic!("segment store poisoned"),
            _ => Ok(Segment::new(Slug::parse(slug)?)),
        }
    }

    async fn delete_segment(&self, slug: String) -> Result<(), SegmentError> {
        if slug.starts_with("ghost") {
            return Err(SegmentError::SegmentNotFound(slug));
        }
        Ok(())
    }

    async fn user_segments(&self, _user_id: UserId) -> Result<Vec<Slug>, SegmentError> {
        Ok(vec![
            Slug::from_persisted("alpha".to_string()),
            Slug::from_persisted("beta".to_string()),
        ])
    }

    async fn change_user_segments(
        &self,
        _user_id: UserId,
        add_slugs: Vec<String>,
        delete_slugs: Vec<String>,
    ) -> Result<ChangeSummary, SegmentError> {
        let missing = add_slugs
            .iter()
            .chain(&delete_slugs)
            .filter(|slug| slug.starts_with("ghost"))
            .count();
        if missing > 0 {
            return Err(SegmentError::missing_segments(missing));
        }

        let conflicts: Vec<&String> = add_slugs.iter().filter(|s| s.starts_with("dup")).collect();
        if !conflicts.is_empty() {
            return Err(SegmentError::already_assigned(conflicts.into_iter().cloned()));
        }

        Ok(ChangeSummary {
            added: add_slugs.len(),
            removed: delete_slugs.len() as u64,
        })
    }
}

fn app() -> Router {
    let http = HttpConfig {
        address: "127.0.0.1:0".to_string(),
        request_timeout: Duration::from_secs(5),
    };
    create_router(AppState::new(FakeService), &http)
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

#[tokio::test]
async fn test_create_segment_returns_created() {
    let (status, body) = send(json_request(
        Method::POST,
        "/segment",
        json!({"slug": "AVITO_VOICE_MESSAGES"}),
    ))
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["slug"], "AVITO_VOICE_MESSAGES");
    assert_eq!(body["id"].as_str().unwrap().len(), 36);
}

#[tokio::test]
async fn test_create_segment_conflict() {
    let (status, body) = send(json_request(Method::POST, "/segment", json!({"slug": "taken"}))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["slugs"], json!(["taken"]));
}

#[tokio::test]
async fn test_create_segment_invalid_slug() {
    let (status, body) = send(json_request(Method::POST, "/segment", json!({"slug": ""}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("slug"));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/segment")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"slug\": "))
        .unwrap();

    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(json_request(Method::POST, "/segment", json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_internal_error_does_not_leak_details() {
    let (status, body) = send(json_request(Method::POST, "/segment", json!({"slug": "boom"}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().unwrap();
    assert!(!error.contains("10.0.0.7"));
    assert!(!error.contains("database"));
}

#[tokio::test]
async fn test_handler_panic_is_internal_error() {
    let request = json_request(Method::POST, "/segment", json!({"slug": "panic"}));
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().contains_key("x-request-id"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Internal server error");
    assert!(!body.to_string().contains("poisoned"));
}

#[tokio::test]
async fn test_delete_segment() {
    let (status, body) = send(empty_request(Method::DELETE, "/segment/beta")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Segment deleted");
}

#[tokio::test]
async fn test_delete_unknown_segment_is_not_found() {
    let (status, body) = send(empty_request(Method::DELETE, "/segment/ghost")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn test_get_user_segments() {
    let (status, body) = send(empty_request(
        Method::GET,
        &format!("/segments/user/{}", USER),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slugs"], json!(["alpha", "beta"]));
}

#[tokio::test]
async fn test_bad_user_id_is_bad_request() {
    let (status, _) = send(empty_request(Method::GET, "/segments/user/42")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(json_request(
        Method::PUT,
        "/segments/user/not-a-uuid",
        json!({"add_slugs": ["a"]}),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_change_user_segments() {
    let (status, body) = send(json_request(
        Method::PUT,
        &format!("/segments/user/{}", USER),
        json!({"add_slugs": ["a", "b"], "delete_slugs": ["c"]}),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"added": 2, "removed": 1}));
}

#[tokio::test]
async fn test_change_user_segments_lists_default_to_empty() {
    let (status, body) = send(json_request(
        Method::PUT,
        &format!("/segments/user/{}", USER),
        json!({}),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"added": 0, "removed": 0}));
}

#[tokio::test]
async fn test_change_user_segments_missing_segments() {
    let (status, body) = send(json_request(
        Method::PUT,
        &format!("/segments/user/{}", USER),
        json!({"add_slugs": ["a", "ghost1"], "delete_slugs": ["ghost2"]}),
    ))
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["missing"], 2);
}

#[tokio::test]
async fn test_change_user_segments_conflict_lists_slugs() {
    let (status, body) = send(json_request(
        Method::PUT,
        &format!("/segments/user/{}", USER),
        json!({"add_slugs": ["dup_b", "fresh", "dup_a"]}),
    ))
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["slugs"], json!(["dup_a", "dup_b"]));
}

#[tokio::test]
async fn test_request_id_is_generated_and_echoed() {
    let response = app()
        .oneshot(empty_request(Method::GET, "/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-123");
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let (status, body) = send(empty_request(Method::GET, "/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/segment"].is_object());
    assert!(body["paths"]["/segments/user/{user_id}"]["put"].is_object());
}
