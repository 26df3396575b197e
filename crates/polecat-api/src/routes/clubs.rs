//! Club routes: dashboard, create, home page, delete, leave.

use axum::{
    Json, Router,
    extract::{Extension, Path, State},
    middleware,
    routing::{get, post},
};
use polecat_clubs::{
    membership,
    registry::{self, ClubHome, Dashboard},
};
use polecat_common::{
    error::PolecatResult,
    models::{Club, CreateClubRequest},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{AppState, middleware::AuthContext, response::Flash};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/clubs", get(dashboard).post(create_club))
        .route("/clubs/{club_id}", get(club_home).delete(delete_club))
        .route("/clubs/{club_id}/leave", post(leave_club))
        .route_layer(middleware::from_fn(crate::middleware::auth_middleware))
}

/// GET /api/v1/clubs
async fn dashboard(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
) -> PolecatResult<Json<Dashboard>> {
    Ok(Json(registry::dashboard(&state.db.pool, auth.user_id).await?))
}

/// POST /api/v1/clubs
async fn create_club(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateClubRequest>,
) -> PolecatResult<Json<Flash<Club>>> {
    let club = registry::create_club(&state.db.pool, auth.user_id, &body).await?;
    let redirect = format!("/clubs/{}", club.id);
    Ok(Json(Flash::with("Club created!", redirect, club)))
}

/// GET /api/v1/clubs/{club_id}
async fn club_home(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(club_id): Path<Uuid>,
) -> PolecatResult<Json<ClubHome>> {
    Ok(Json(registry::club_home(&state.db.pool, auth.user_id, club_id).await?))
}

/// DELETE /api/v1/clubs/{club_id}
async fn delete_club(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(club_id): Path<Uuid>,
) -> PolecatResult<Json<Flash>> {
    let emails = registry::delete_club(&state.db.pool, auth.user_id, club_id).await?;
    // Mail delivery lives outside this service; the former members are only logged.
    tracing::debug!(%club_id, recipients = ?emails, "Club deletion notice pending");
    Ok(Json(Flash::new("Club deleted!", "/clubs")))
}

/// POST /api/v1/clubs/{club_id}/leave
async fn leave_club(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(club_id): Path<Uuid>,
) -> PolecatResult<Json<Flash>> {
    membership::leave(&state.db.pool, auth.user_id, club_id).await?;
    Ok(Json(Flash::new("You have successfully left the club", "/clubs")))
}
