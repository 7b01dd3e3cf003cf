use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};

use crate::entities::user::UserRole;
use crate::models::auth_model::Claims;

pub struct JwtUtils;

impl JwtUtils {
    /// Sign an HS256 access token valid for `ttl` from now.
    pub fn generate_jwt(
        secret: &str,
        ttl: Duration,
        user_id: i64,
        username: &str,
        email: &str,
        role: UserRole,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            email: email.to_string(),
            role,
            exp: (now + ttl).timestamp().max(0) as usize,
            iat: now.timestamp() as usize,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
    }

    pub fn validate_jwt(secret: &str, token: &str) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
    }
}
