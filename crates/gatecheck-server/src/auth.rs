use anyhow::Result;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use gatecheck_common::models::auth::Claims;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};

/// Access tokens are valid for 10 hours; there is no refresh mechanism.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 36_000;

/// Hash a password using argon2id
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Create an access token (JWT) carrying the user id and role
pub fn create_access_token(user_id: &str, role: &str, jwt_secret: &str) -> Result<String> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        iat: now,
        exp: now + ACCESS_TOKEN_TTL_SECS,
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )?;
    Ok(token)
}

/// Validate an access token and return its claims.
///
/// Returns the raw jsonwebtoken error so the caller can distinguish an
/// expired token from a malformed or tampered one. Never panics on
/// untrusted input.
pub fn validate_access_token(
    token: &str,
    jwt_secret: &str,
) -> jsonwebtoken::errors::Result<Claims> {
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::ErrorKind;

    #[test]
    fn test_password_hash_and_verify_correct() {
        let password = "my-secure-password";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash).unwrap());
    }

    #[test]
    fn test_password_verify_wrong() {
        let hash = hash_password("correct-password").unwrap();
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_password_different_salts() {
        let password = "same-password";
        let hash1 = hash_password(password).unwrap();
        let hash2 = hash_password(password).unwrap();
        assert_ne!(hash1, hash2);
        // Both still verify
        assert!(verify_password(password, &hash1).unwrap());
        assert!(verify_password(password, &hash2).unwrap());
    }

    #[test]
    fn test_plaintext_never_stored_in_hash() {
        let hash = hash_password("hunter2-plaintext").unwrap();
        assert!(!hash.contains("hunter2-plaintext"));
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_jwt_create_and_validate() {
        let secret = "test-jwt-secret";
        let token = create_access_token("user-123", "attendee", secret).unwrap();
        let claims = validate_access_token(&token, secret).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.role, "attendee");
    }

    #[test]
    fn test_jwt_expiry_is_ten_hours() {
        let token = create_access_token("user-123", "admin", "secret").unwrap();
        let claims = validate_access_token(&token, "secret").unwrap();
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_TTL_SECS);
    }

    #[test]
    fn test_jwt_wrong_secret_fails() {
        let token = create_access_token("user-123", "attendee", "secret-1").unwrap();
        let result = validate_access_token(&token, "secret-2");
        assert!(result.is_err());
    }

    #[test]
    fn test_jwt_garbage_input_fails_without_panic() {
        for garbage in ["", "not-a-jwt", "a.b.c", "ey.ey.ey"] {
            assert!(validate_access_token(garbage, "secret").is_err());
        }
    }

    #[test]
    fn test_jwt_expired_token_is_rejected() {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "user-123".to_string(),
            role: "attendee".to_string(),
            iat: now - 7_200,
            exp: now - 3_600,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        let err = validate_access_token(&token, "secret").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ExpiredSignature));
    }
}
