/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/auth/register` - Register new user
/// - `POST /api/auth/login` - Login and get tokens
/// - `POST /api/auth/refresh` - Rotate the token pair
/// - `POST /api/auth/forgot-password` - Request a password reset
/// - `POST /api/auth/reset-password` - Redeem a reset token
/// - `GET  /api/auth/me` - Current user with profile
///
/// # Token scheme
///
/// Every successful register/login/refresh issues a fresh access +
/// refresh pair and persists the SHA-256 digest of the refresh token on
/// the user. Presenting a refresh token whose digest no longer matches
/// (one that has already been rotated away) fails even though its
/// signature is still valid.
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use corkboard_shared::{
    auth::{
        jwt::{self, Claims, TokenType},
        middleware::AuthContext,
        password,
        token,
    },
    models::{
        profile::UserProfile,
        user::{CreateUser, User, UserRole},
    },
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// Password (minimum 8 characters)
    pub password: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: Option<String>,

    /// Password
    pub password: Option<String>,
}

/// Refresh request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// Refresh token from a previous register/login/refresh
    pub refresh_token: Option<String>,
}

/// Forgot-password request
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    /// Email address (never confirmed or denied)
    pub email: Option<String>,
}

/// Reset-password request
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    /// Reset token from the forgot-password flow
    pub token: Option<String>,

    /// New password (minimum 8 characters)
    pub password: Option<String>,
}

/// User summary returned by auth endpoints
#[derive(Debug, Serialize)]
pub struct UserSummary {
    /// User ID
    pub id: Uuid,

    /// Email address
    pub email: String,

    /// Account role
    pub role: UserRole,

    /// Gamification profile (xp, level)
    pub profile: Option<UserProfile>,
}

impl UserSummary {
    fn new(user: &User, profile: Option<UserProfile>) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            profile,
        }
    }
}

/// Register/login response: token pair plus user summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Access token (short-lived)
    pub token: String,

    /// Refresh token (long-lived)
    pub refresh_token: String,

    /// Authenticated user
    pub user: UserSummary,
}

/// Refresh response: rotated token pair
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// New access token
    pub token: String,

    /// New refresh token
    pub refresh_token: String,
}

/// Generic message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
}

/// Me response
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// Current user
    pub user: UserSummary,
}

/// Issues a fresh access + refresh pair and persists the refresh digest
///
/// Rotation happens here: whatever refresh token was valid before this
/// call is dead once the new digest is stored.
async fn issue_token_pair(state: &AppState, user: &User) -> ApiResult<(String, String)> {
    let access_claims = Claims::with_expiration(
        user.id,
        user.email.clone(),
        user.role,
        TokenType::Access,
        state.access_expiry(),
    );
    let refresh_claims = Claims::with_expiration(
        user.id,
        user.email.clone(),
        user.role,
        TokenType::Refresh,
        state.refresh_expiry(),
    );

    let access_token = jwt::create_token(&access_claims, state.access_secret())?;
    let refresh_token = jwt::create_token(&refresh_claims, state.refresh_secret())?;

    state
        .store
        .set_refresh_token_hash(user.id, Some(token::hash_token(&refresh_token)))
        .await?;

    Ok((access_token, refresh_token))
}

fn require(field: Option<String>, name: &str) -> ApiResult<String> {
    field
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::Validation(format!("{} is required", name)))
}

/// Register a new user
///
/// Creates the account, its profile (xp=0, level=1), and a default board
/// seeded with "To Do" / "In Progress" / "Done" columns, then issues the
/// first token pair.
///
/// # Errors
///
/// - `400 Bad Request`: missing email/password, invalid email, short password
/// - `409 Conflict`: email already registered
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate()
        .map_err(|e| ApiError::Validation(validation_message(&e)))?;

    let email = require(req.email, "email")?;
    let password_plain = require(req.password, "password")?;
    password::validate_password(&password_plain).map_err(ApiError::Validation)?;

    let password_hash = password::hash_password(&password_plain)?;

    let user = state
        .store
        .create_user(CreateUser {
            email,
            password_hash,
        })
        .await?;

    let profile = state.store.create_profile(user.id).await?;

    // Every account starts with a ready-to-use board
    super::boards::create_default_board(state.store.as_ref(), user.id).await?;

    let (access_token, refresh_token) = issue_token_pair(&state, &user).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: access_token,
            refresh_token,
            user: UserSummary::new(&user, Some(profile)),
        }),
    ))
}

/// Login with email and password
///
/// # Errors
///
/// - `400 Bad Request`: missing fields
/// - `401 Unauthorized`: unknown email or wrong password (same message
///   for both, to avoid account enumeration)
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let email = require(req.email, "email")?;
    let password_plain = require(req.password, "password")?;

    let user = state
        .store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::Auth("Invalid credentials".to_string()))?;

    let valid = password::verify_password(&password_plain, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Auth("Invalid credentials".to_string()));
    }

    let profile = state.store.find_profile_by_user(user.id).await?;
    let (access_token, refresh_token) = issue_token_pair(&state, &user).await?;

    Ok(Json(AuthResponse {
        token: access_token,
        refresh_token,
        user: UserSummary::new(&user, profile),
    }))
}

/// Rotate the token pair
///
/// The presented refresh token must carry a valid signature AND match
/// the digest stored at its issue time. A token that was already rotated
/// away fails the digest comparison, which catches replay of stolen
/// refresh tokens.
///
/// # Errors
///
/// - `400 Bad Request`: missing refresh token
/// - `401 Unauthorized`: invalid signature, expired, unknown user, or
///   stale (already-rotated) token
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let presented = require(req.refresh_token, "refreshToken")?;

    let claims = jwt::validate_refresh_token(&presented, state.refresh_secret())?;

    let user = state
        .store
        .find_user_by_id(claims.sub)
        .await?
        .ok_or_else(|| ApiError::Auth("Invalid refresh token".to_string()))?;

    let presented_hash = token::hash_token(&presented);
    if user.refresh_token_hash.as_deref() != Some(presented_hash.as_str()) {
        return Err(ApiError::Auth("Invalid refresh token".to_string()));
    }

    let (access_token, refresh_token) = issue_token_pair(&state, &user).await?;

    Ok(Json(RefreshResponse {
        token: access_token,
        refresh_token,
    }))
}

/// Request a password reset
///
/// Always answers with the same generic message so the endpoint cannot
/// be used to probe which emails are registered. When the account
/// exists, an opaque token is generated and only its digest stored,
/// valid for one hour.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    if let Some(email) = req.email.filter(|e| !e.trim().is_empty()) {
        if let Some(user) = state.store.find_user_by_email(&email).await? {
            let (_token, hash) = token::generate_token();
            state
                .store
                .set_reset_token(user.id, hash, token::reset_token_expiry())
                .await?;
            tracing::info!(user_id = %user.id, "Password reset token issued");
        }
    }

    Ok(Json(MessageResponse {
        message: "If that email is registered, a reset link has been sent".to_string(),
    }))
}

/// Redeem a reset token and set a new password
///
/// Redeeming clears the reset state and the refresh digest: the token is
/// single-use and outstanding sessions die with the old password.
///
/// # Errors
///
/// - `400 Bad Request`: missing/short password, missing token, or a
///   token that is unknown or expired
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let presented = require(req.token, "token")?;
    let password_plain = require(req.password, "password")?;
    password::validate_password(&password_plain).map_err(ApiError::Validation)?;

    let user = state
        .store
        .find_user_by_reset_token_hash(&token::hash_token(&presented))
        .await?
        .ok_or_else(|| ApiError::Validation("Invalid or expired reset token".to_string()))?;

    let expired = user
        .reset_token_expires_at
        .map(|expires_at| expires_at < Utc::now())
        .unwrap_or(true);
    if expired {
        return Err(ApiError::Validation(
            "Invalid or expired reset token".to_string(),
        ));
    }

    let password_hash = password::hash_password(&password_plain)?;
    state.store.update_password(user.id, password_hash).await?;

    Ok(Json(MessageResponse {
        message: "Password has been reset".to_string(),
    }))
}

/// Current user with profile
///
/// # Errors
///
/// - `401 Unauthorized`: missing/invalid token, or the account is gone
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<MeResponse>> {
    let user = state
        .store
        .find_user_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Auth("User not found".to_string()))?;

    let profile = state.store.find_profile_by_user(user.id).await?;

    Ok(Json(MeResponse {
        user: UserSummary::new(&user, profile),
    }))
}

/// Flattens validator errors into one message
fn validation_message(errors: &validator::ValidationErrors) -> String {
    let messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();

    if messages.is_empty() {
        "Request validation failed".to_string()
    } else {
        messages.join("; ")
    }
}
