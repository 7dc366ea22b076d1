/// Opaque token utilities
///
/// This module generates and hashes the opaque tokens Corkboard keeps
/// server-side state for: the current refresh token (rotation reuse
/// detection) and password-reset tokens.
///
/// # Security
///
/// - **Generation**: 32 random base62 chars from the thread RNG
///   (key space 62^32, about 2^190 combinations)
/// - **Storage**: only the SHA-256 hex digest is persisted; the
///   plaintext token exists solely in the response/email to the user
/// - **Comparison**: hash the presented token and compare digests, so a
///   leaked database row is never redeemable
///
/// # Example
///
/// ```
/// use corkboard_shared::auth::token::{generate_token, hash_token};
///
/// let (plaintext, stored_hash) = generate_token();
/// assert_eq!(plaintext.len(), 32);
/// assert_eq!(stored_hash.len(), 64); // SHA-256 hex
/// assert_eq!(hash_token(&plaintext), stored_hash);
/// ```
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of a generated opaque token (characters)
const TOKEN_LENGTH: usize = 32;

/// Password-reset tokens are valid for one hour
pub const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Generates a new opaque token
///
/// # Returns
///
/// Tuple of (plaintext_token, sha256_hex_hash). Store the hash, hand the
/// plaintext to the user exactly once.
pub fn generate_token() -> (String, String) {
    let token = generate_random_string(TOKEN_LENGTH);
    let hash = hash_token(&token);

    (token, hash)
}

/// Generates a random alphanumeric string
///
/// Uses base62 (A-Z, a-z, 0-9) so tokens stay URL-safe.
fn generate_random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Hashes an opaque token using SHA-256
///
/// # Returns
///
/// Hex-encoded SHA-256 digest (64 characters)
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Computes the expiry instant for a password-reset token issued now
pub fn reset_token_expiry() -> DateTime<Utc> {
    Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS)
}
