//! Authentication and authorization

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::PartyId;

/// JWT claims
///
/// The subject is the landlord's party id; every repository call is scoped
/// to it explicitly, so no handler relies on ambient identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (landlord party ID)
    pub sub: String,
    /// User's roles
    pub roles: Vec<String>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl Claims {
    /// Parses the subject as the caller's landlord identity
    pub fn landlord_id(&self) -> Option<PartyId> {
        self.sub.parse().ok()
    }
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Missing permission: {0}")]
    MissingPermission(String),
}

/// Creates a new JWT token
pub fn create_token(
    landlord_id: PartyId,
    roles: Vec<String>,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: landlord_id.as_uuid().to_string(),
        roles,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        if e.to_string().contains("ExpiredSignature") {
            AuthError::TokenExpired
        } else {
            AuthError::InvalidToken
        }
    })?;

    Ok(token_data.claims)
}

/// Checks if user has required role
pub fn has_role(claims: &Claims, required_role: &str) -> bool {
    claims.roles.iter().any(|r| r == required_role || r == "admin")
}

/// Permission definitions
pub mod permissions {
    pub const LEASE_READ: &str = "lease:read";
    pub const LEASE_WRITE: &str = "lease:write";
    pub const INVOICE_READ: &str = "invoice:read";
    pub const INVOICE_WRITE: &str = "invoice:write";
    pub const ADVANCE_READ: &str = "advance:read";
    pub const ADVANCE_WRITE: &str = "advance:write";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let landlord = PartyId::new();
        let token = create_token(landlord, vec!["landlord".to_string()], "secret", 60).unwrap();

        let claims = validate_token(&token, "secret").unwrap();
        assert_eq!(claims.landlord_id(), Some(landlord));
        assert!(has_role(&claims, "landlord"));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(PartyId::new(), vec![], "secret", 60).unwrap();
        assert!(validate_token(&token, "other-secret").is_err());
    }
}
