use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config;

/// JWT claims as asserted by the identity provider. The `groups` list is
/// trusted as given once the signature checks out; it carries both
/// capability groups (`members_read`, `admin`, ...) and regional groups
/// (`Regio_Utrecht`, `Regio_All`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub groups: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(sub: String, email: String, groups: Vec<String>) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub,
            email,
            groups,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

pub fn generate_jwt(claims: Claims) -> Result<String, JwtError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, &claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_carry_groups_and_expiry() {
        let claims = Claims::new(
            "abc".to_string(),
            "bestuur@example.nl".to_string(),
            vec!["members_read".to_string(), "Regio_Zuid".to_string()],
        );
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.groups.len(), 2);
    }

    #[test]
    fn generate_jwt_produces_a_compact_token() {
        // Relies on the development preset carrying a non-empty secret.
        let claims = Claims::new("abc".to_string(), "a@b.nl".to_string(), vec![]);
        let token = generate_jwt(claims).expect("token generation");
        assert_eq!(token.split('.').count(), 3);
    }
}
