//! End-to-end registration flow through the public router

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use registration_service::api::{create_router, AppState};
use registration_service::domain::user::{EmailMatching, HashCost};
use registration_service::domain::UserRepository;
use registration_service::infrastructure::user::{
    Argon2Hasher, InMemoryUserRepository, PasswordHasher, UserService,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn hasher() -> Arc<Argon2Hasher> {
    Arc::new(
        Argon2Hasher::with_cost(HashCost {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap(),
    )
}

fn app(repository: Arc<InMemoryUserRepository>, email_matching: EmailMatching) -> Router {
    let service = UserService::new(repository, hasher()).with_email_matching(email_matching);
    create_router(AppState::new(Arc::new(service)))
}

async fn post_register(app: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn registers_then_rejects_duplicate() {
    let repository = Arc::new(InMemoryUserRepository::new());
    let app = app(Arc::clone(&repository), EmailMatching::Exact);

    let (status, body) = post_register(
        &app,
        json!({ "name": "Jane Doe", "email": "jane@example.com", "password": "password123" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully.");
    assert_eq!(body["savedUser"]["name"], "Jane Doe");
    assert_eq!(body["savedUser"]["email"], "jane@example.com");

    let stored = repository
        .find_by_email("jane@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.id().to_string(), body["savedUser"]["id"].as_str().unwrap());
    assert!(hasher().verify("password123", stored.password()));
    assert!(!hasher().verify("password124", stored.password()));

    let (status, body) = post_register(
        &app,
        json!({ "name": "Jane Again", "email": "jane@example.com", "password": "another" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Email is already registered." }));
    assert_eq!(repository.count().await.unwrap(), 1);
}

#[tokio::test]
async fn rejects_incomplete_submissions_without_storing() {
    let repository = Arc::new(InMemoryUserRepository::new());
    let app = app(Arc::clone(&repository), EmailMatching::Exact);

    let payloads = [
        json!({ "email": "jane@example.com", "password": "password123" }),
        json!({ "name": "Jane Doe", "password": "password123" }),
        json!({ "name": "Jane Doe", "email": "jane@example.com" }),
        json!({ "name": "Jane Doe", "email": "jane@example.com", "password": "" }),
        json!({}),
    ];

    for payload in payloads {
        let (status, body) = post_register(&app, payload).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "All fields are required." }));
    }

    assert_eq!(repository.count().await.unwrap(), 0);
}

#[tokio::test]
async fn case_insensitive_policy_treats_case_variants_as_duplicates() {
    let repository = Arc::new(InMemoryUserRepository::new());
    let app = app(Arc::clone(&repository), EmailMatching::CaseInsensitive);

    let (status, _) = post_register(
        &app,
        json!({ "name": "Jane", "email": "Jane@Example.com", "password": "pw" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = post_register(
        &app,
        json!({ "name": "Jane", "email": "jane@example.com", "password": "pw" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(repository.count().await.unwrap(), 1);
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let app = app(Arc::new(InMemoryUserRepository::new()), EmailMatching::Exact);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert!(response.headers().contains_key("x-request-id"));
}
