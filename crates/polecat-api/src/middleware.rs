//! Middleware: caller identity from the bearer token, and security headers.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue, header},
    middleware::Next,
    response::Response,
};
use polecat_common::error::PolecatError;

use crate::auth;

/// The authenticated caller, inserted into request extensions by [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: uuid::Uuid,
    pub username: String,
}

/// Extract and validate the JWT from the `Authorization: Bearer <token>` header.
pub async fn auth_middleware(mut request: Request, next: Next) -> Result<Response, PolecatError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(PolecatError::Unauthorized)?;

    let config = polecat_common::config::get();
    let claims =
        auth::validate_token(token, &config.auth.jwt_secret).map_err(|_| PolecatError::InvalidToken)?;

    let user_id = claims
        .sub
        .parse::<uuid::Uuid>()
        .map_err(|_| PolecatError::InvalidToken)?;

    request.extensions_mut().insert(AuthContext {
        user_id,
        username: claims.username,
    });

    Ok(next.run(request).await)
}

/// Add security headers to every response.
pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let h = response.headers_mut();

    for (name, value) in [
        ("x-content-type-options", "nosniff"),
        ("x-frame-options", "DENY"),
        ("referrer-policy", "strict-origin-when-cross-origin"),
        ("content-security-policy", "default-src 'none'; frame-ancestors 'none'"),
    ] {
        h.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }

    response
}
