//! Authenticated identity carried in the session cookie

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// JWT claims for an authenticated reader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserClaims {
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Only the reader themself may act on `email`
    pub fn require_email(&self, email: &str) -> Result<(), AppError> {
        if self.email == email {
            Ok(())
        } else {
            Err(AppError::Authorization("Forbidden Access!".to_string()))
        }
    }
}

/// Token request body for `/jwt`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TokenRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn claims(exp_offset: i64) -> UserClaims {
        let now = Utc::now().timestamp();
        UserClaims {
            email: "a@x.com".to_string(),
            exp: now + exp_offset,
            iat: now,
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let original = claims(3600);
        let token = original.create_token("secret").unwrap();
        assert_eq!(UserClaims::from_token(&token, "secret").unwrap(), original);
    }

    #[test]
    fn test_token_rejects_wrong_secret_and_expiry() {
        let token = claims(3600).create_token("secret").unwrap();
        assert!(UserClaims::from_token(&token, "other").is_err());

        let expired = claims(-3600).create_token("secret").unwrap();
        assert!(UserClaims::from_token(&expired, "secret").is_err());
    }

    #[test]
    fn test_require_email() {
        let claims = claims(3600);
        assert!(claims.require_email("a@x.com").is_ok());
        assert!(matches!(
            claims.require_email("b@x.com"),
            Err(AppError::Authorization(_))
        ));
    }
}
