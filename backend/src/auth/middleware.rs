use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
    body::Body,
};
use crate::AppState;
use super::{validate_jwt, AuthError};

/// Subject of the validated bearer token.
#[derive(Clone, Debug)]
pub struct UserId(pub String);

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or(AuthError::MissingToken)?;

    match validate_jwt(token, &state.config.jwt_secret) {
        Ok(user_id) => {
            request.extensions_mut().insert(UserId(user_id));
            Ok(next.run(request).await)
        },
        Err(e) => {
            tracing::warn!("Rejected bearer token: {}", e);
            Err(e)
        }
    }
}
