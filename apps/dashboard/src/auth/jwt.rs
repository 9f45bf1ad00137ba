// Session token creation and decoding
// Tokens are HS256 JWTs carrying the user id and a 24-hour expiry

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How long an issued token claims to be valid
pub const TOKEN_TTL_HOURS: i64 = 24;

/// JWT claims structure
///
/// # Fields
/// * `sub` - Subject (user id)
/// * `exp` - Expiry time (seconds since epoch)
/// * `jti` - Random token id, so two tokens for the same user never collide
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub jti: Uuid,
}

/// Creates a session token for a user
///
/// # Arguments
/// * `user_id` - The user's id to include in the token
/// * `secret` - The secret key for signing (from configuration)
///
/// # Returns
/// * `Ok(String)` - The token
/// * `Err(String)` - If token creation fails
///
/// # Example
/// ```
/// use tasktrove_dashboard::auth::jwt::create_token;
///
/// let token = create_token("user-1", "your-secret-key").expect("valid token");
/// assert_eq!(token.split('.').count(), 3);
/// ```
pub fn create_token(user_id: &str, secret: &str) -> Result<String, String> {
    let expiry = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);
    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiry.timestamp() as usize,
        jti: Uuid::new_v4(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| e.to_string())
}

/// Verifies and decodes a session token
///
/// The dashboard itself never calls this on its own sessions; it exists for
/// a backend that wants to check signature and expiry.
///
/// # Example
/// ```
/// use tasktrove_dashboard::auth::jwt::{create_token, verify_token};
///
/// let token = create_token("user-1", "your-secret-key").unwrap();
/// let claims = verify_token(&token, "your-secret-key").expect("valid token");
/// assert_eq!(claims.sub, "user-1");
/// ```
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}
