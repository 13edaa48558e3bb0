/// JWT validation for the posts service
///
/// Tokens are signed with HS256; the secret is loaded from configuration at
/// startup. Keys are initialized once and immutable thereafter, so request
/// handling never takes a lock.
///
/// Services must call `initialize_hmac()` during startup before any JWT
/// operations:
///
/// ```rust
/// use auth_core::jwt;
///
/// jwt::initialize_hmac("secret").expect("Failed to initialize JWT keys");
/// let token = jwt::generate_token(42, chrono::Duration::hours(1)).unwrap();
/// assert_eq!(jwt::validate_token(&token).unwrap().claims.sub, "42");
/// ```
use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims carried by access tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id, as a decimal string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

static JWT_ENCODING_KEY: OnceCell<EncodingKey> = OnceCell::new();
static JWT_DECODING_KEY: OnceCell<DecodingKey> = OnceCell::new();

/// Initialize the HMAC signing/validation keys from a shared secret.
///
/// Must be called during application startup before any JWT operation.
/// Subsequent calls return an error and leave the existing keys in place.
pub fn initialize_hmac(secret: &str) -> Result<()> {
    if secret.is_empty() {
        return Err(anyhow!("JWT secret must not be empty"));
    }

    JWT_ENCODING_KEY
        .set(EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|_| anyhow!("JWT keys already initialized"))?;
    JWT_DECODING_KEY
        .set(DecodingKey::from_secret(secret.as_bytes()))
        .map_err(|_| anyhow!("JWT keys already initialized"))?;

    Ok(())
}

/// Generate a signed token for `user_id`, valid for `ttl`.
pub fn generate_token(user_id: i64, ttl: Duration) -> Result<String> {
    let encoding_key = JWT_ENCODING_KEY
        .get()
        .ok_or_else(|| anyhow!("JWT keys not initialized"))?;

    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(&Header::new(JWT_ALGORITHM), &claims, encoding_key)
        .map_err(|e| anyhow!("Failed to encode token: {e}"))
}

/// Validate a token's signature and expiry, returning its claims.
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let decoding_key = JWT_DECODING_KEY
        .get()
        .ok_or_else(|| anyhow!("JWT keys not initialized"))?;

    let validation = Validation::new(JWT_ALGORITHM);
    decode::<Claims>(token, decoding_key, &validation)
        .map_err(|e| anyhow!("Invalid token: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_test_keys() {
        // Idempotent across tests within one binary.
        let _ = initialize_hmac("test-secret");
    }

    #[test]
    fn token_round_trip() {
        init_test_keys();

        let token = generate_token(42, Duration::hours(1)).unwrap();
        let data = validate_token(&token).unwrap();

        assert_eq!(data.claims.sub, "42");
        assert!(data.claims.exp > data.claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        init_test_keys();

        let token = generate_token(7, Duration::seconds(-120)).unwrap();
        assert!(validate_token(&token).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        init_test_keys();

        let token = generate_token(7, Duration::hours(1)).unwrap();
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[2] = parts[2].chars().rev().collect();
        assert!(validate_token(&parts.join(".")).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        init_test_keys();
        assert!(validate_token("not-a-jwt").is_err());
    }
}
