use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use jsonwebtoken::{encode, decode, Header, EncodingKey, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::{time::{SystemTime, UNIX_EPOCH}, fmt};

pub mod middleware;

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    JWT(jsonwebtoken::errors::Error),
    InvalidToken,
    TokenExpired,
    InvalidSignature,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken => write!(f, "Missing bearer token"),
            Self::JWT(e) => write!(f, "JWT error: {}", e),
            Self::InvalidToken => write!(f, "Invalid token"),
            Self::TokenExpired => write!(f, "Token expired"),
            Self::InvalidSignature => write!(f, "Invalid signature"),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::JWT(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::JWT(err)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "Missing token"),
            Self::JWT(_) => (StatusCode::UNAUTHORIZED, "Invalid token"),
            Self::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
            Self::TokenExpired => (StatusCode::UNAUTHORIZED, "Token has expired"),
            Self::InvalidSignature => (StatusCode::UNAUTHORIZED, "Invalid signature"),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Checks signature and expiry and returns the token's subject.
pub fn validate_jwt(token: &str, secret: &str) -> Result<String, AuthError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation
    ).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::JWT(e)
    })?;

    if token_data.claims.sub.trim().is_empty() {
        return Err(AuthError::InvalidToken);
    }
    Ok(token_data.claims.sub)
}

/// Signs an access token for `subject` valid for `ttl_secs`.
pub fn create_jwt(subject: &str, secret: &str, ttl_secs: u64) -> Result<String, AuthError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let token = encode(
        &Header::default(),
        &Claims {
            sub: subject.to_string(),
            exp: (now + ttl_secs) as usize,
        },
        &EncodingKey::from_secret(secret.as_bytes())
    )?;
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let token = create_jwt("user-1", "secret", 60).unwrap();
        assert_eq!(validate_jwt(&token, "secret").unwrap(), "user-1");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_jwt("user-1", "secret", 60).unwrap();
        assert!(matches!(validate_jwt(&token, "other"), Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(validate_jwt("not-a-token", "secret").is_err());
    }
}
