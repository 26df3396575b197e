//! Application routes: apply, review queue, accept/reject, own list, cancel.

use axum::{
    Json, Router,
    extract::{Extension, Path, State},
    middleware,
    routing::{delete, get, post},
};
use polecat_clubs::applications;
use polecat_common::{
    error::PolecatResult,
    models::{Application, ApplicationReview, CreateApplicationRequest, Membership},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{AppState, middleware::AuthContext, response::Flash};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/clubs/{club_id}/applications",
            get(pending_for_club).post(apply),
        )
        .route(
            "/clubs/{club_id}/applications/{application_id}/accept",
            post(accept),
        )
        .route(
            "/clubs/{club_id}/applications/{application_id}/reject",
            post(reject),
        )
        .route("/applications", get(my_applications))
        .route("/applications/{application_id}", delete(cancel))
        .route_layer(middleware::from_fn(crate::middleware::auth_middleware))
}

fn queue(club_id: Uuid) -> String {
    format!("/clubs/{club_id}/applications")
}

/// GET /api/v1/clubs/{club_id}/applications
async fn pending_for_club(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(club_id): Path<Uuid>,
) -> PolecatResult<Json<Vec<ApplicationReview>>> {
    Ok(Json(
        applications::pending_for_club(&state.db.pool, auth.user_id, club_id).await?,
    ))
}

/// POST /api/v1/clubs/{club_id}/applications
async fn apply(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(club_id): Path<Uuid>,
    Json(body): Json<CreateApplicationRequest>,
) -> PolecatResult<Json<Flash<Application>>> {
    let application = applications::apply(&state.db.pool, auth.user_id, club_id, &body).await?;
    Ok(Json(Flash::with(
        "Application submitted!",
        "/applications",
        application,
    )))
}

/// POST /api/v1/clubs/{club_id}/applications/{application_id}/accept
async fn accept(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path((club_id, application_id)): Path<(Uuid, Uuid)>,
) -> PolecatResult<Json<Flash<Membership>>> {
    let member = applications::accept(&state.db.pool, auth.user_id, club_id, application_id).await?;
    Ok(Json(Flash::with("Application accepted!", queue(club_id), member)))
}

/// POST /api/v1/clubs/{club_id}/applications/{application_id}/reject
async fn reject(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path((club_id, application_id)): Path<(Uuid, Uuid)>,
) -> PolecatResult<Json<Flash>> {
    applications::reject(&state.db.pool, auth.user_id, club_id, application_id).await?;
    Ok(Json(Flash::new("Application rejected!", queue(club_id))))
}

/// GET /api/v1/applications
async fn my_applications(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
) -> PolecatResult<Json<Vec<Application>>> {
    Ok(Json(applications::my_applications(&state.db.pool, auth.user_id).await?))
}

/// DELETE /api/v1/applications/{application_id}
async fn cancel(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(application_id): Path<Uuid>,
) -> PolecatResult<Json<Flash>> {
    applications::cancel(&state.db.pool, auth.user_id, application_id).await?;
    Ok(Json(Flash::new("Application cancelled.", "/applications")))
}
