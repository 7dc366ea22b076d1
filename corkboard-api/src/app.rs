/// Application state and router builder
///
/// This module defines the shared application state and assembles the
/// Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use corkboard_api::{app::{build_router, AppState}, config::Config};
/// use corkboard_shared::store::memory::MemStore;
/// use std::sync::Arc;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemStore::new()), config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```
use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use chrono::Duration;
use corkboard_shared::auth::{jwt, middleware::{bearer_token, AuthContext}};
use corkboard_shared::store::Store;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into each request handler via Axum's `State` extractor; both
/// fields are Arc'd so cloning stays cheap.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend (Postgres in production, in-memory in tests)
    pub store: Arc<dyn Store>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Secret for access-token operations
    pub fn access_secret(&self) -> &str {
        &self.config.jwt.access_secret
    }

    /// Secret for refresh-token operations
    pub fn refresh_secret(&self) -> &str {
        &self.config.jwt.refresh_secret
    }

    /// Configured access-token lifetime
    pub fn access_expiry(&self) -> Duration {
        Duration::minutes(self.config.jwt.access_expiry_minutes)
    }

    /// Configured refresh-token lifetime
    pub fn refresh_expiry(&self) -> Duration {
        Duration::days(self.config.jwt.refresh_expiry_days)
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /api
/// ├── /health                    # Liveness + store status (public)
/// ├── /auth/                     # Authentication
/// │   ├── POST /register         # (public)
/// │   ├── POST /login            # (public)
/// │   ├── POST /refresh          # (public)
/// │   ├── POST /forgot-password  # (public)
/// │   ├── POST /reset-password   # (public)
/// │   └── GET  /me               # (bearer)
/// ├── /boards                    # GET, POST; /:id DELETE; /:id/members POST
/// ├── /columns                   # GET, POST; /:id PUT, DELETE
/// ├── /tasks                     # GET, POST; /:id GET, PUT, DELETE; /:id/tags POST
/// ├── /tags                      # GET, POST
/// └── /sync                      # POST; /status GET
/// ```
///
/// # Middleware Stack
///
/// Applied in order (outermost first): security headers, CORS, request
/// tracing; bearer authentication wraps the resource routes only.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes: health + credential flows
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/refresh", post(routes::auth::refresh))
        .route("/auth/forgot-password", post(routes::auth::forgot_password))
        .route("/auth/reset-password", post(routes::auth::reset_password));

    // Resource routes: everything behind bearer authentication
    let protected_routes = Router::new()
        .route("/auth/me", get(routes::auth::me))
        .route("/boards", get(routes::boards::list_boards))
        .route("/boards", post(routes::boards::create_board))
        .route("/boards/:id", delete(routes::boards::delete_board))
        .route("/boards/:id/members", post(routes::boards::add_member))
        .route("/columns", get(routes::columns::list_columns))
        .route("/columns", post(routes::columns::create_column))
        .route("/columns/:id", put(routes::columns::update_column))
        .route("/columns/:id", delete(routes::columns::delete_column))
        .route("/tasks", get(routes::tasks::list_tasks))
        .route("/tasks", post(routes::tasks::create_task))
        .route("/tasks/:id", get(routes::tasks::get_task))
        .route("/tasks/:id", put(routes::tasks::update_task))
        .route("/tasks/:id", delete(routes::tasks::delete_task))
        .route("/tasks/:id/tags", post(routes::tasks::add_tag))
        .route("/tags", get(routes::tags::list_tags))
        .route("/tags", post(routes::tags::create_tag))
        .route("/sync", post(routes::sync::sync))
        .route("/sync/status", get(routes::sync::sync_status))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let api_routes = public_routes.merge(protected_routes);

    // Configure CORS from the single allowed origin
    let cors = if state.config.api.cors_origin == "*" {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = [state.config.api.cors_origin.as_str()]
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(false))
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Validates the bearer access token, confirms the subject still exists,
/// and injects an [`AuthContext`] into the request extensions.
async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;

    let claims = jwt::validate_access_token(token, state.access_secret())?;

    // Tokens outlive accounts; make sure the subject is still real
    let user = state
        .store
        .find_user_by_id(claims.sub)
        .await?
        .ok_or_else(|| ApiError::Auth("User not found".to_string()))?;

    let auth_context = AuthContext {
        user_id: user.id,
        email: user.email,
        role: user.role,
    };
    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, DatabaseConfig, JwtConfig, StoreMode};
    use corkboard_shared::store::memory::MemStore;

    fn test_config() -> Config {
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
                user: "u".to_string(),
                password: "p".to_string(),
                name: "n".to_string(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                access_secret: "test-access-secret-at-least-32-bytes".to_string(),
                refresh_secret: "test-refresh-secret-at-least-32-bytes".to_string(),
                access_expiry_minutes: 15,
                refresh_expiry_days: 7,
            },
        }
    }

    #[test]
    fn test_expiry_helpers() {
        let state = AppState::new(Arc::new(MemStore::new()), test_config());
        assert_eq!(state.access_expiry(), Duration::minutes(15));
        assert_eq!(state.refresh_expiry(), Duration::days(7));
    }

    #[test]
    fn test_router_builds() {
        let state = AppState::new(Arc::new(MemStore::new()), test_config());
        let _router = build_router(state);
    }
}
