//! Match workflow: `Pending` → `Player1Win` | `Player2Win` | `Draw` | `Cancelled`.
//!
//! Time is passed in by the caller. A match may be scheduled only in the future, its
//! result recorded only once its start time has been reached, and it may be cancelled
//! or forfeited at any time while it is still pending.

use chrono::{DateTime, Utc};
use polecat_common::error::{PolecatError, PolecatResult};
use polecat_common::models::{Match, MatchOutcome, MatchRecord, MatchStatus, ScheduleMatchRequest};
use polecat_common::role::Role;
use polecat_common::validation::validate_request;
use polecat_db::repository::matches::{self, NewMatch};
use serde::Serialize;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::{guard, storage_error};

/// A player's matches split by state, with their record.
#[derive(Debug, Serialize)]
pub struct MatchBoard {
    pub upcoming: Vec<Match>,
    pub previous: Vec<Match>,
    pub record: MatchRecord,
}

impl MatchBoard {
    pub(crate) fn for_player(user_id: Uuid, games: Vec<Match>) -> Self {
        let record = MatchRecord::tally(user_id, &games);
        let (upcoming, previous): (Vec<_>, Vec<_>) = games.into_iter().partition(Match::is_pending);
        Self {
            upcoming,
            previous,
            record,
        }
    }
}

/// Schedule a match between two members. Requires Officer or Owner.
///
/// Checked in order: distinct players, a future start, no match of any status for
/// either player at that instant, and (by the schema) membership of both players.
pub async fn schedule(
    pool: &SqlitePool,
    actor: Uuid,
    club_id: Uuid,
    body: &ScheduleMatchRequest,
    now: DateTime<Utc>,
) -> PolecatResult<Match> {
    let mut tx = pool.begin().await?;
    guard::club(&mut tx, club_id).await?;
    guard::require_role(&mut tx, actor, club_id, Role::Officer).await?;
    validate_request(body)?;

    if body.player_1 == body.player_2 {
        return Err(PolecatError::field("player_2", "Both players cannot be the same!"));
    }
    if body.date_time <= now {
        return Err(PolecatError::field("date_time", "Date/time must be in future!"));
    }
    if matches::has_conflict(&mut *tx, body.player_1, body.player_2, body.date_time).await? {
        tracing::warn!(%club_id, player_1 = %body.player_1, player_2 = %body.player_2, "Scheduling conflict");
        return Err(PolecatError::field(
            "date_time",
            "One or both players have a scheduled match at this date/time!",
        ));
    }

    let new = NewMatch {
        player_1_id: body.player_1,
        player_2_id: body.player_2,
        club_id,
        location: body.location.trim(),
        date_time: body.date_time,
    };
    let game = matches::create_match(&mut *tx, Uuid::now_v7(), &new)
        .await
        .map_err(storage_error)?;

    tx.commit().await?;
    tracing::info!(%actor, %club_id, match_id = %game.id, "Match scheduled");
    Ok(game)
}

/// Record the result of an overdue match. Requires Officer or Owner.
pub async fn record_outcome(
    pool: &SqlitePool,
    actor: Uuid,
    club_id: Uuid,
    match_id: Uuid,
    outcome: MatchOutcome,
    now: DateTime<Utc>,
) -> PolecatResult<Match> {
    let mut tx = pool.begin().await?;
    guard::club(&mut tx, club_id).await?;
    guard::require_role(&mut tx, actor, club_id, Role::Officer).await?;

    let game = load(&mut tx, club_id, match_id).await?;
    if !game.is_pending() {
        return Err(PolecatError::conflict("This match already has a result"));
    }
    if !game.is_overdue(now) {
        return Err(PolecatError::conflict("This match has not been played yet"));
    }

    let game = settle(&mut tx, game, outcome.into(), "This match already has a result").await?;
    tx.commit().await?;
    tracing::info!(%actor, %club_id, %match_id, status = ?game.status, "Match result recorded");
    Ok(game)
}

/// Cancel a pending match, before or after its start. Requires Officer or Owner.
pub async fn cancel(
    pool: &SqlitePool,
    actor: Uuid,
    club_id: Uuid,
    match_id: Uuid,
) -> PolecatResult<Match> {
    let mut tx = pool.begin().await?;
    guard::club(&mut tx, club_id).await?;
    guard::require_role(&mut tx, actor, club_id, Role::Officer).await?;

    let game = load(&mut tx, club_id, match_id).await?;
    let game = settle(
        &mut tx,
        game,
        MatchStatus::Cancelled,
        "Cannot cancel a match that already has an outcome",
    )
    .await?;

    tx.commit().await?;
    tracing::info!(%actor, %club_id, %match_id, "Match cancelled");
    Ok(game)
}

/// Concede a pending match; the opponent is awarded the win. Only the two players may.
pub async fn forfeit(
    pool: &SqlitePool,
    actor: Uuid,
    club_id: Uuid,
    match_id: Uuid,
) -> PolecatResult<Match> {
    let mut tx = pool.begin().await?;
    guard::club(&mut tx, club_id).await?;

    let game = load(&mut tx, club_id, match_id).await?;
    let Some(status) = game.forfeited_by(actor) else {
        tracing::warn!(%actor, %match_id, "Forfeit by non-player refused");
        return Err(PolecatError::forbidden("You cannot forfeit this match"));
    };
    let game = settle(&mut tx, game, status, "This match already has a result").await?;

    tx.commit().await?;
    tracing::info!(%actor, %club_id, %match_id, status = ?game.status, "Match forfeited");
    Ok(game)
}

/// The actor's matches across all clubs.
pub async fn my_matches(pool: &SqlitePool, actor: Uuid) -> PolecatResult<MatchBoard> {
    let games = matches::list_for_player(pool, actor).await?;
    Ok(MatchBoard::for_player(actor, games))
}

/// Load a match through its club. A match of another club is reported as missing.
async fn load(conn: &mut SqliteConnection, club_id: Uuid, match_id: Uuid) -> PolecatResult<Match> {
    matches::find_by_id(&mut *conn, match_id)
        .await?
        .filter(|m| m.club_id == club_id)
        .ok_or_else(|| PolecatError::not_found("Match"))
}

/// Move a pending match to a terminal status, or fail with `refusal` if it is not pending.
async fn settle(
    conn: &mut SqliteConnection,
    mut game: Match,
    status: MatchStatus,
    refusal: &str,
) -> PolecatResult<Match> {
    if game.status.is_terminal() || !matches::resolve(&mut *conn, game.id, status).await? {
        return Err(PolecatError::conflict(refusal));
    }
    game.status = status;
    Ok(game)
}
