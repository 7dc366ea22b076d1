/// Common test utilities for integration tests
///
/// Builds the full router over the in-memory store, so the suite
/// exercises real routing, middleware, and handlers without a database.
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use corkboard_api::app::{build_router, AppState};
use corkboard_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig, StoreMode};
use corkboard_shared::store::memory::MemStore;
use serde_json::Value;
use tower::ServiceExt;

/// Test context containing the app and direct store access
pub struct TestContext {
    pub app: Router,
    pub store: Arc<MemStore>,
    pub config: Config,
}

impl TestContext {
    /// Creates a fresh context with an empty in-memory store
    pub fn new() -> Self {
        let config = test_config();
        let store = Arc::new(MemStore::new());
        let state = AppState::new(store.clone(), config.clone());
        let app = build_router(state);

        TestContext { app, store, config }
    }

    /// Sends a request and returns (status, parsed JSON body)
    ///
    /// Empty bodies (204 etc.) come back as `Value::Null`.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request should build"),
            None => builder.body(Body::empty()).expect("request should build"),
        };

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("request should not fail at the transport level");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    /// Registers a user and returns the 201 response body
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let (status, body) = self
            .request(
                "POST",
                "/api/auth/register",
                None,
                Some(serde_json::json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        body
    }
}

/// Configuration for tests: memory store, fixed secrets
pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origin: "*".to_string(),
            store_mode: StoreMode::Memory,
        },
        database: DatabaseConfig {
            host: "localhost".to_string(),
            port: 5432,
            user: "test".to_string(),
            password: "test".to_string(),
            name: "test".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            access_secret: "integration-test-access-secret-32b!".to_string(),
            refresh_secret: "integration-test-refresh-secret-32b".to_string(),
            access_expiry_minutes: 15,
            refresh_expiry_days: 7,
        },
    }
}

/// Pulls a string field out of a JSON body
pub fn str_field<'a>(body: &'a Value, pointer: &str) -> &'a str {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("missing string at {} in {}", pointer, body))
}
