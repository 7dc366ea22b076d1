/// Authentication context for request handling
///
/// This module provides the request-scoped authentication context and the
/// bearer-credential extraction used by the API server's auth layer. The
/// layer itself lives in the API crate (it needs the application state to
/// resolve the user); this module owns the types it produces.
///
/// # Request Extensions
///
/// After successful authentication, the auth layer adds an
/// [`AuthContext`] to the request extensions. Handlers extract it with
/// Axum's `Extension` extractor:
///
/// ```
/// use axum::Extension;
/// use corkboard_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```
use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::Claims;
use crate::models::user::UserRole;

/// Authentication context added to request extensions
///
/// Carries the verified identity for the duration of one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// Email at token issue time
    pub email: String,

    /// Role at token issue time
    pub role: UserRole,
}

impl AuthContext {
    /// Creates an auth context from validated JWT claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email.clone(),
            role: claims.role,
        }
    }
}

/// Error type for bearer-credential extraction
#[derive(Debug, thiserror::Error)]
pub enum BearerError {
    /// Missing Authorization header
    #[error("Missing authorization header")]
    MissingCredentials,

    /// Header present but not a Bearer scheme
    #[error("Expected Bearer token")]
    InvalidScheme,
}

/// Extracts the bearer token from request headers
///
/// # Errors
///
/// Returns `BearerError::MissingCredentials` when the Authorization
/// header is absent or unreadable, `BearerError::InvalidScheme` when it
/// does not carry a `Bearer ` prefix.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(BearerError::MissingCredentials)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or(BearerError::InvalidScheme)
}
