use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime: 7 days
pub const TOKEN_TTL: i64 = 604800;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,  // Subject (user ID)
    pub role: String, // "admin" or "user"
    pub exp: i64,     // Expiration time
    pub iat: i64,     // Issued at
    pub jti: String,  // JWT ID
}

impl JwtClaims {
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Stateless HS256 token issuer and verifier
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!("JWT auth initialized");
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    /// Issue a token for `user_id` valid for [`TOKEN_TTL`] seconds.
    pub fn create_token(&self, user_id: Uuid, role: &str) -> Result<String, Error> {
        self.create_token_with_ttl(user_id, role, TOKEN_TTL)
    }

    fn create_token_with_ttl(
        &self,
        user_id: Uuid,
        role: &str,
        ttl_seconds: i64,
    ) -> Result<String, Error> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id.to_string(),
            role: role.to_string(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Verify signature and expiry, returning the claims.
    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, Error> {
        let token_data = decode::<JwtClaims>(
            token,
            &self.decoding,
            &Validation::new(Algorithm::HS256),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(secret: &str) -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(secret).unwrap())
    }

    #[test]
    fn test_token_carries_user_id_and_role() {
        let auth = auth("this-is-a-valid-secret-with-32-chars!");
        let user_id = Uuid::now_v7();

        let token = auth.create_token(user_id, ROLE_ADMIN).unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert!(claims.is_admin());
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL);
    }

    #[test]
    fn test_tokens_have_unique_ids() {
        let auth = auth("this-is-a-valid-secret-with-32-chars!");
        let user_id = Uuid::now_v7();

        let a = auth.verify_token(&auth.create_token(user_id, ROLE_USER).unwrap()).unwrap();
        let b = auth.verify_token(&auth.create_token(user_id, ROLE_USER).unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
        assert!(!a.is_admin());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = auth("this-is-a-valid-secret-with-32-chars!");
        let verifier = auth("a-completely-different-secret-of-32+");

        let token = issuer.create_token(Uuid::now_v7(), ROLE_USER).unwrap();
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let auth = auth("this-is-a-valid-secret-with-32-chars!");
        // Beyond the default 60 second leeway
        let token = auth
            .create_token_with_ttl(Uuid::now_v7(), ROLE_USER, -120)
            .unwrap();
        assert!(auth.verify_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let auth = auth("this-is-a-valid-secret-with-32-chars!");
        assert!(auth.verify_token("not.a.jwt").is_err());
    }
}
