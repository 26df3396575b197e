//! The caller's own account.

use axum::{
    Json, Router,
    extract::{Extension, State},
    middleware,
    routing::{get, put},
};
use polecat_clubs::registry;
use polecat_common::{
    error::PolecatResult,
    models::{ChangePasswordRequest, UpdateProfileRequest, UserResponse},
};
use std::sync::Arc;

use crate::{AppState, middleware::AuthContext, response::Flash};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/@me", get(get_me).patch(update_me).delete(close_account))
        .route("/users/@me/password", put(change_password))
        .route_layer(middleware::from_fn(crate::middleware::auth_middleware))
}

/// GET /api/v1/users/@me
async fn get_me(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
) -> PolecatResult<Json<UserResponse>> {
    let user = registry::profile(&state.db.pool, auth.user_id).await?;
    Ok(Json(user.into()))
}

/// PATCH /api/v1/users/@me
async fn update_me(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<UpdateProfileRequest>,
) -> PolecatResult<Json<Flash<UserResponse>>> {
    let user = registry::update_profile(&state.db.pool, auth.user_id, &body).await?;
    Ok(Json(Flash::with("Profile updated!", "/users/@me", user.into())))
}

/// PUT /api/v1/users/@me/password
async fn change_password(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChangePasswordRequest>,
) -> PolecatResult<Json<Flash>> {
    registry::change_password(&state.db.pool, auth.user_id, &body).await?;
    Ok(Json(Flash::new("Password changed!", "/users/@me")))
}

/// DELETE /api/v1/users/@me
async fn close_account(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
) -> PolecatResult<Json<Flash>> {
    registry::close_account(&state.db.pool, auth.user_id).await?;
    Ok(Json(Flash::new("Your account has been closed.", "/")))
}
