//! Session token service

use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::UserClaims,
};

#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Sign an identity token for `email`
    pub fn issue_token(&self, email: &str) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            email: email.to_string(),
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Check signature and expiry of a token
    pub fn verify_token(&self, token: &str) -> AppResult<UserClaims> {
        UserClaims::from_token(token, &self.config.jwt_secret).map_err(|e| {
            tracing::debug!("Rejected token: {}", e);
            AppError::Authentication("Unauthorized!".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify() {
        let auth = AuthService::new(AuthConfig::default());
        let token = auth.issue_token("a@x.com").unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_verify_rejects_foreign_token() {
        let ours = AuthService::new(AuthConfig::default());
        let theirs = AuthService::new(AuthConfig {
            jwt_secret: "another-secret".to_string(),
            ..AuthConfig::default()
        });

        let token = theirs.issue_token("a@x.com").unwrap();
        assert!(matches!(
            ours.verify_token(&token),
            Err(AppError::Authentication(_))
        ));
        assert!(ours.verify_token("not-a-jwt").is_err());
    }
}
