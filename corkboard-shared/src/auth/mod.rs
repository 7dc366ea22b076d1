/// Authentication utilities
///
/// This module provides the secure authentication primitives for Corkboard:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and validation
/// - [`jwt`]: JWT access/refresh token generation and validation
/// - [`token`]: Opaque token generation and SHA-256 hashing (refresh
///   rotation state, password-reset tokens)
/// - [`middleware`]: Request authentication context and bearer extraction
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **JWT Tokens**: HS256 signing with separate access/refresh secrets
/// - **Opaque Tokens**: Secure random generation with SHA-256 hashing,
///   so a stolen database never yields a redeemable token
///
/// # Example
///
/// ```no_run
/// use corkboard_shared::auth::password::{hash_password, verify_password};
/// use corkboard_shared::auth::token::{generate_token, hash_token};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // Opaque token for password reset
/// let (plaintext, stored_hash) = generate_token();
/// assert_eq!(hash_token(&plaintext), stored_hash);
/// # Ok(())
/// # }
/// ```
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod token;
