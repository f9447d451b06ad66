use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::Claims;
use crate::error::ApiError;
use crate::server::AppState;
use crate::types::UserId;

/// Authenticated caller, attached to the request by `jwt_auth_middleware`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: Option<String>,
}

impl TryFrom<Claims> for AuthUser {
    type Error = crate::auth::JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: claims.user_id()?,
            email: claims.email,
        })
    }
}

/// Rejects the request with 401 unless it carries a valid bearer token.
///
/// Runs before the handler and before the body is read, so a rejected
/// request never touches the store.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(request.headers()).map_err(|msg| {
        tracing::warn!("Rejected {} {}: {}", request.method(), request.uri().path(), msg);
        ApiError::unauthorized(msg)
    })?;

    let auth_user = state
        .jwt
        .verify(token)
        .and_then(AuthUser::try_from)
        .map_err(|e| {
            tracing::warn!("Rejected {} {}: {}", request.method(), request.uri().path(), e);
            ApiError::from(e)
        })?;

    tracing::debug!(
        "Authenticated user {} <{}>",
        auth_user.user_id,
        auth_user.email.as_deref().unwrap_or("-")
    );
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or("Authentication credentials were not provided")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    match auth_str.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
            let token = token.trim();
            if token.is_empty() {
                Err("Empty JWT token")
            } else {
                Ok(token)
            }
        }
        _ => Err("Authorization header must use Bearer token format"),
    }
}
