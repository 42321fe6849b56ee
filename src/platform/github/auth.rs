use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use std::path::Path;

use crate::error::{AppError, Result};

#[derive(Debug, Serialize)]
struct JwtClaims {
    iat: i64,
    exp: i64,
    iss: String,
}

/// Load the GitHub App private key once at start-up.
pub fn load_private_key(private_key_path: &Path) -> Result<EncodingKey> {
    let key_pem = std::fs::read(private_key_path).map_err(|e| {
        AppError::Config(format!(
            "Failed to read private key at {}: {e}",
            private_key_path.display()
        ))
    })?;

    EncodingKey::from_rsa_pem(&key_pem)
        .map_err(|e| AppError::Config(format!("Invalid RSA private key: {e}")))
}

/// Generate a JWT for GitHub App authentication.
pub fn generate_app_jwt(app_id: u64, key: &EncodingKey) -> Result<String> {
    let now = chrono::Utc::now().timestamp();
    let claims = JwtClaims {
        iat: now - 60,      // 60 seconds in the past to account for clock drift
        exp: now + 10 * 60, // 10 minute maximum
        iss: app_id.to_string(),
    };

    let header = Header::new(Algorithm::RS256);
    encode(&header, &claims, key)
        .map_err(|e| AppError::Internal(format!("Failed to generate JWT: {e}")))
}
