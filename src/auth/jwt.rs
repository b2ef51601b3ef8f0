//! Session token issuing and validation
//!
//! Tokens are stateless HS256 JWTs. Validity is a pure function of the
//! signature and the expiry; the gate additionally re-checks that the
//! admin is still active.

use crate::{config::AppConfig, error::AppError, models::admin::AdminRole};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (admin ID)
    pub sub: String,

    /// Admin role at issuance
    pub role: AdminRole,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,

    /// JWT ID (unique token identifier)
    pub jti: String,
}

impl Claims {
    pub fn admin_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::Unauthorized)
    }
}

/// JWT service
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl_secs: u64,
}

impl JwtService {
    /// Create JWT service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret = config.security.jwt_secret.expose_secret();

        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            token_ttl_secs: config.security.token_ttl_secs,
        })
    }

    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl_secs
    }

    /// Issue a session token for an admin
    pub fn issue(&self, admin_id: &Uuid, role: AdminRole) -> Result<String, AppError> {
        self.issue_with_ttl(admin_id, role, Duration::seconds(self.token_ttl_secs as i64))
    }

    fn issue_with_ttl(
        &self,
        admin_id: &Uuid,
        role: AdminRole,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let now = Utc::now();

        let claims = Claims {
            sub: admin_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode session token: {:?}", e);
            AppError::Internal(format!("Failed to encode session token: {}", e))
        })
    }

    /// Validate signature and expiry, returning the claims
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        Ok(decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                AppError::Unauthorized
            })?
            .claims)
    }

    /// Token that expired an hour ago; used by tests exercising the gate
    #[doc(hidden)]
    pub fn issue_expired(&self, admin_id: &Uuid, role: AdminRole) -> Result<String, AppError> {
        self.issue_with_ttl(admin_id, role, Duration::hours(-1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_config;

    #[test]
    fn test_issue_and_validate() {
        let service = JwtService::from_config(&test_config()).unwrap();
        let admin_id = Uuid::new_v4();

        let token = service.issue(&admin_id, AdminRole::Superadmin).unwrap();

        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.admin_id().unwrap(), admin_id);
        assert_eq!(claims.role, AdminRole::Superadmin);
        assert_eq!(claims.exp - claims.iat, 604800);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = JwtService::from_config(&test_config()).unwrap();
        let token = service.issue_expired(&Uuid::new_v4(), AdminRole::Admin).unwrap();

        assert!(matches!(service.validate(&token), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let service = JwtService::from_config(&test_config()).unwrap();

        let mut other_config = test_config();
        other_config.security.jwt_secret =
            secrecy::Secret::new("another-secret-that-is-also-32-chars-long".to_string());
        let other = JwtService::from_config(&other_config).unwrap();

        let token = other.issue(&Uuid::new_v4(), AdminRole::Admin).unwrap();
        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_invalid_token_fails() {
        let service = JwtService::from_config(&test_config()).unwrap();
        assert!(service.validate("invalid_token").is_err());
        assert!(service.validate("").is_err());
    }
}
