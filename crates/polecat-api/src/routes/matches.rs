//! Match routes. Wall-clock time is read here and passed into the workflow.

use axum::{
    Json, Router,
    extract::{Extension, Path, State},
    middleware,
    routing::{get, post},
};
use chrono::Utc;
use polecat_clubs::matches::{self, MatchBoard};
use polecat_common::{
    error::PolecatResult,
    models::{Match, RecordOutcomeRequest, ScheduleMatchRequest},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{AppState, middleware::AuthContext, response::Flash};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/clubs/{club_id}/matches", post(schedule))
        .route("/clubs/{club_id}/matches/{match_id}/outcome", post(record_outcome))
        .route("/clubs/{club_id}/matches/{match_id}/cancel", post(cancel))
        .route("/clubs/{club_id}/matches/{match_id}/forfeit", post(forfeit))
        .route("/matches", get(my_matches))
        .route_layer(middleware::from_fn(crate::middleware::auth_middleware))
}

fn club_page(club_id: Uuid) -> String {
    format!("/clubs/{club_id}")
}

/// POST /api/v1/clubs/{club_id}/matches
async fn schedule(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(club_id): Path<Uuid>,
    Json(body): Json<ScheduleMatchRequest>,
) -> PolecatResult<Json<Flash<Match>>> {
    let game = matches::schedule(&state.db.pool, auth.user_id, club_id, &body, Utc::now()).await?;
    Ok(Json(Flash::with("Match has been created", club_page(club_id), game)))
}

/// POST /api/v1/clubs/{club_id}/matches/{match_id}/outcome
async fn record_outcome(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path((club_id, match_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<RecordOutcomeRequest>,
) -> PolecatResult<Json<Flash<Match>>> {
    let game = matches::record_outcome(
        &state.db.pool,
        auth.user_id,
        club_id,
        match_id,
        body.outcome,
        Utc::now(),
    )
    .await?;
    Ok(Json(Flash::with("Match result recorded!", club_page(club_id), game)))
}

/// POST /api/v1/clubs/{club_id}/matches/{match_id}/cancel
async fn cancel(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path((club_id, match_id)): Path<(Uuid, Uuid)>,
) -> PolecatResult<Json<Flash<Match>>> {
    let game = matches::cancel(&state.db.pool, auth.user_id, club_id, match_id).await?;
    Ok(Json(Flash::with("Match has been cancelled", club_page(club_id), game)))
}

/// POST /api/v1/clubs/{club_id}/matches/{match_id}/forfeit
async fn forfeit(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path((club_id, match_id)): Path<(Uuid, Uuid)>,
) -> PolecatResult<Json<Flash<Match>>> {
    let game = matches::forfeit(&state.db.pool, auth.user_id, club_id, match_id).await?;
    Ok(Json(Flash::with(
        "Match has been successfully forfeited",
        "/matches",
        game,
    )))
}

/// GET /api/v1/matches
async fn my_matches(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
) -> PolecatResult<Json<MatchBoard>> {
    Ok(Json(matches::my_matches(&state.db.pool, auth.user_id).await?))
}
