//! Authentication routes: register and login.

use axum::{Json, Router, extract::State, routing::post};
use polecat_clubs::registry;
use polecat_common::{
    error::{PolecatError, PolecatResult},
    models::{LoginRequest, SignUpRequest, User, UserResponse},
};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    AppState,
    auth::{self, AccessToken},
};

/// Auth router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[derive(Serialize)]
struct AuthResponse {
    user: UserResponse,
    #[serde(flatten)]
    token: AccessToken,
}

/// POST /api/v1/auth/register
async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignUpRequest>,
) -> PolecatResult<Json<AuthResponse>> {
    let user = registry::sign_up(&state.db.pool, &body).await?;
    Ok(Json(issue(user)?))
}

/// POST /api/v1/auth/login
async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> PolecatResult<Json<AuthResponse>> {
    let user = registry::authenticate(&state.db.pool, &body).await?;
    Ok(Json(issue(user)?))
}

fn issue(user: User) -> PolecatResult<AuthResponse> {
    let config = polecat_common::config::get();
    let token = auth::generate_access_token(
        user.id,
        &user.username,
        &config.auth.jwt_secret,
        config.auth.access_token_ttl_secs,
    )
    .map_err(|e| PolecatError::Internal(e.into()))?;

    Ok(AuthResponse {
        user: user.into(),
        token,
    })
}
