//! User registration endpoint

use axum::{extract::State, http::StatusCode, routing::post, Router};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::User;
use crate::infrastructure::user::RegisterUserRequest;

/// Success message returned with a newly created user
pub const REGISTERED_MESSAGE: &str = "User registered successfully.";

/// Create the registration router
pub fn create_users_router() -> Router<AppState> {
    Router::new().route("/register", post(register))
}

/// Registration request body
///
/// Every field is optional here; presence is checked by the service.
/// Values that are not JSON strings count as missing.
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "string_or_missing")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_missing")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_missing")]
    pub password: Option<String>,
}

fn string_or_missing<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Some(value),
        _ => None,
    })
}

impl From<RegisterRequest> for RegisterUserRequest {
    fn from(request: RegisterRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }
}

/// User response (safe to expose)
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

/// Registration response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub saved_user: UserResponse,
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    debug!(email = ?request.email, "Registration requested");

    let user = state.user_service.register(request.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: REGISTERED_MESSAGE.to_string(),
            saved_user: UserResponse::from(&user),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request},
    };
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::api::router::create_router;
    use crate::api::types::SERVER_ERROR_MESSAGE;
    use crate::domain::user::{HashCost, MockUserRepository};
    use crate::domain::DomainError;
    use crate::infrastructure::user::{Argon2Hasher, InMemoryUserRepository, UserService};

    fn cheap_hasher() -> Arc<Argon2Hasher> {
        Arc::new(
            Argon2Hasher::with_cost(HashCost {
                memory_kib: 64,
                iterations: 1,
                parallelism: 1,
            })
            .unwrap(),
        )
    }

    fn in_memory_app() -> Router {
        let service = UserService::new(Arc::new(InMemoryUserRepository::new()), cheap_hasher());
        create_router(AppState::new(Arc::new(service)))
    }

    fn register_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_register_created() {
        let app = in_memory_app();

        let (status, body) = send(
            &app,
            register_request(json!({
                "name": "Jane Doe",
                "email": "jane@example.com",
                "password": "password123"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], REGISTERED_MESSAGE);
        assert_eq!(body["savedUser"]["name"], "Jane Doe");
        assert_eq!(body["savedUser"]["email"], "jane@example.com");
        assert!(body["savedUser"]["id"].is_string());
        assert!(body["savedUser"].get("password").is_none());
    }

    #[tokio::test]
    async fn test_register_missing_field() {
        let app = in_memory_app();

        let (status, body) = send(
            &app,
            register_request(json!({ "name": "Jane Doe", "password": "password123" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "All fields are required." }));
    }

    #[tokio::test]
    async fn test_register_empty_field() {
        let app = in_memory_app();

        let (status, body) = send(
            &app,
            register_request(json!({ "name": "Jane Doe", "email": "", "password": "password123" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "All fields are required.");
    }

    #[tokio::test]
    async fn test_register_non_string_fields_are_missing() {
        let app = in_memory_app();

        let payloads = [
            json!({ "name": 123, "email": "jane@example.com", "password": "password123" }),
            json!({ "name": "Jane Doe", "email": ["jane@example.com"], "password": "pw" }),
            json!({ "name": "Jane Doe", "email": "jane@example.com", "password": false }),
            json!({ "name": null, "email": "jane@example.com", "password": "password123" }),
        ];

        for payload in payloads {
            let (status, body) = send(&app, register_request(payload)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "message": "All fields are required." }));
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let app = in_memory_app();
        let payload = json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "password": "password123"
        });

        let (first, _) = send(&app, register_request(payload)).await;
        assert_eq!(first, StatusCode::CREATED);

        let (status, body) = send(
            &app,
            register_request(json!({
                "name": "Other",
                "email": "jane@example.com",
                "password": "different"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Email is already registered." }));
    }

    #[tokio::test]
    async fn test_register_persistence_failure() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_email_exists()
            .returning(|_| Err(DomainError::storage("connection refused")));

        let service = UserService::new(Arc::new(repository), cheap_hasher());
        let app = create_router(AppState::new(Arc::new(service)));

        let (status, body) = send(
            &app,
            register_request(json!({
                "name": "Jane Doe",
                "email": "jane@example.com",
                "password": "password123"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": SERVER_ERROR_MESSAGE }));
    }

    #[tokio::test]
    async fn test_register_malformed_json() {
        let app = in_memory_app();

        let request = Request::builder()
            .method("POST")
            .uri("/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();

        let (status, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[test]
    fn test_user_response_from_user() {
        let digest = "$argon2id$v=19$m=65536,t=2,p=1$c29tZXNhbHQ$CTFhFdXPJO1aFaMaO6Mm5c8y7cJHAph8ArZWb2GRPPc"
            .parse()
            .unwrap();
        let user = crate::domain::NewUser::new("Jane Doe", "jane@example.com", digest)
            .into_user(crate::domain::UserId::generate(), chrono::Utc::now());

        let response = UserResponse::from(&user);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["name"], "Jane Doe");
        assert!(json.get("createdAt").is_some());
    }
}
