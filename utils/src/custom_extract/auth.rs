use abi::errors::{Error, Result};
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::{async_trait, http::header::AUTHORIZATION};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

const BEARER: &str = "Bearer";
const EXPIRES: i64 = 60 * 60 * 4;

/// secret used to sign and verify access tokens,
/// pulled out of the router state with `FromRef`
#[derive(Debug, Clone)]
pub struct JwtSecret(pub String);

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        let exp = now + EXPIRES;
        Self {
            sub: user_id.to_string(),
            exp,
            iat: now,
        }
    }

    pub fn encode(&self, secret: &JwtSecret) -> Result<String> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.0.as_bytes()),
        )
        .map_err(Error::internal)
    }
}

/// The authenticated caller, taken from the `sub` claim of the bearer token.
pub struct AuthUser(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    JwtSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let secret = JwtSecret::from_ref(state);
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .ok_or_else(|| Error::unauthorized_with_details("UnAuthorized Request"))?;

        let token = match header.split_once(' ') {
            Some((BEARER, token)) if !token.trim().is_empty() => token.trim(),
            _ => return Err(Error::unauthorized_with_details("UnAuthorized Request")),
        };

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.0.as_bytes()),
            &Validation::default(),
        )
        .map_err(|err| Error::unauthorized(err, "invalid token"))?
        .claims;

        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|err| Error::unauthorized(err, "invalid token subject"))?;
        debug!("authenticated user: {}", user_id);
        Ok(Self(user_id))
    }
}
