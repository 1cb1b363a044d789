use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use residency_platform_shared::JWT_ACCESS_TOKEN_EXPIRY;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,   // Subject (user ID)
    pub email: String, // Email
    pub exp: i64,      // Expiration time
    pub iat: i64,      // Issued at
    pub jti: String,   // JWT ID
    pub token_type: String,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn new(secret: &str) -> Result<Self, AppError> {
        if secret.len() < 32 {
            return Err(AppError::Internal(
                "JWT_SECRET must be at least 32 characters long".to_string(),
            ));
        }

        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub", "iat"]);
        validation.validate_exp = true;
        validation.leeway = 30; // 30 seconds leeway for clock skew

        Ok(Self {
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Generate an access token
    pub fn generate_access_token(&self, user_id: Uuid, email: String) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = now
            + Duration::from_std(JWT_ACCESS_TOKEN_EXPIRY)
                .map_err(|_| AppError::Internal("Invalid token expiry duration".to_string()))?;

        let claims = Claims {
            sub: user_id.to_string(),
            email,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type: "access".to_string(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Authentication(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-that-is-long-enough-for-hs256";

    #[test]
    fn access_token_round_trip() {
        let service = JwtService::new(TEST_SECRET).unwrap();
        let user_id = Uuid::new_v4();

        let token = service
            .generate_access_token(user_id, "student@example.com".to_string())
            .unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "student@example.com");
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn rejects_short_secret() {
        assert!(JwtService::new("too-short").is_err());
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let issuer = JwtService::new("another-secret-key-that-is-long-enough!!").unwrap();
        let verifier = JwtService::new(TEST_SECRET).unwrap();

        let token = issuer
            .generate_access_token(Uuid::new_v4(), "x@example.com".to_string())
            .unwrap();

        assert!(verifier.validate_token(&token).is_err());
    }

    #[test]
    fn rejects_garbage_token() {
        let service = JwtService::new(TEST_SECRET).unwrap();
        assert!(service.validate_token("not.a.jwt").is_err());
    }
}
