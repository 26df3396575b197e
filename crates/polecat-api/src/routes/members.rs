//! Member routes: roster, profiles, and the role engine.

use axum::{
    Json, Router,
    extract::{Extension, Path, State},
    middleware,
    routing::{get, post},
};
use polecat_clubs::{
    membership::{self, Transfer},
    registry::{self, MemberProfile},
};
use polecat_common::{error::PolecatResult, models::MemberEntry};
use std::sync::Arc;
use uuid::Uuid;

use crate::{AppState, middleware::AuthContext, response::Flash};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/clubs/{club_id}/members", get(list_members))
        .route(
            "/clubs/{club_id}/members/{user_id}",
            get(show_member).delete(remove_member),
        )
        .route("/clubs/{club_id}/members/{user_id}/promote", post(promote))
        .route("/clubs/{club_id}/members/{user_id}/demote", post(demote))
        .route(
            "/clubs/{club_id}/members/{user_id}/transfer-ownership",
            post(transfer_ownership),
        )
        .route_layer(middleware::from_fn(crate::middleware::auth_middleware))
}

fn roster(club_id: Uuid) -> String {
    format!("/clubs/{club_id}/members")
}

/// GET /api/v1/clubs/{club_id}/members
async fn list_members(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(club_id): Path<Uuid>,
) -> PolecatResult<Json<Vec<MemberEntry>>> {
    Ok(Json(registry::members_list(&state.db.pool, auth.user_id, club_id).await?))
}

/// GET /api/v1/clubs/{club_id}/members/{user_id}
async fn show_member(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path((club_id, user_id)): Path<(Uuid, Uuid)>,
) -> PolecatResult<Json<MemberProfile>> {
    Ok(Json(
        registry::show_member(&state.db.pool, auth.user_id, club_id, user_id).await?,
    ))
}

/// POST /api/v1/clubs/{club_id}/members/{user_id}/promote
async fn promote(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path((club_id, user_id)): Path<(Uuid, Uuid)>,
) -> PolecatResult<Json<Flash>> {
    membership::promote(&state.db.pool, auth.user_id, club_id, user_id).await?;
    Ok(Json(Flash::new("Member promoted!", roster(club_id))))
}

/// POST /api/v1/clubs/{club_id}/members/{user_id}/demote
async fn demote(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path((club_id, user_id)): Path<(Uuid, Uuid)>,
) -> PolecatResult<Json<Flash>> {
    membership::demote(&state.db.pool, auth.user_id, club_id, user_id).await?;
    Ok(Json(Flash::new("Officer demoted!", roster(club_id))))
}

/// DELETE /api/v1/clubs/{club_id}/members/{user_id}
async fn remove_member(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path((club_id, user_id)): Path<(Uuid, Uuid)>,
) -> PolecatResult<Json<Flash>> {
    membership::remove(&state.db.pool, auth.user_id, club_id, user_id).await?;
    Ok(Json(Flash::new("Member deleted!", roster(club_id))))
}

/// POST /api/v1/clubs/{club_id}/members/{user_id}/transfer-ownership
async fn transfer_ownership(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path((club_id, user_id)): Path<(Uuid, Uuid)>,
) -> PolecatResult<Json<Flash>> {
    let message = match membership::transfer_ownership(&state.db.pool, auth.user_id, club_id, user_id)
        .await?
    {
        Transfer::Transferred => "Ownership transferred!",
        Transfer::AlreadyOwner => "You are already the owner of the club.",
    };
    Ok(Json(Flash::new(message, roster(club_id))))
}
