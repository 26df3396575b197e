//! Match repository — scheduled games and their results.

use chrono::{DateTime, Utc};
use polecat_common::models::r#match::{Match, MatchStatus};
use sqlx::SqliteExecutor;
use uuid::Uuid;

/// Fields needed to schedule a match.
pub struct NewMatch<'a> {
    pub player_1_id: Uuid,
    pub player_2_id: Uuid,
    pub club_id: Uuid,
    pub location: &'a str,
    pub date_time: DateTime<Utc>,
}

/// Insert a pending match. The schema rejects non-members, identical players,
/// duplicate slots and double bookings.
pub async fn create_match(
    db: impl SqliteExecutor<'_>,
    id: Uuid,
    new: &NewMatch<'_>,
) -> Result<Match, sqlx::Error> {
    sqlx::query_as::<_, Match>(
        r#"
        INSERT INTO matches (id, player_1_id, player_2_id, club_id, location, date_time, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?, 'pending', ?)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(new.player_1_id)
    .bind(new.player_2_id)
    .bind(new.club_id)
    .bind(new.location)
    .bind(new.date_time)
    .bind(Utc::now())
    .fetch_one(db)
    .await
}

/// Find a match by ID.
pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: Uuid) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Whether either player already has a match at exactly `date_time`, in either
/// slot, at any location and whatever its status.
pub async fn has_conflict(
    db: impl SqliteExecutor<'_>,
    player_1_id: Uuid,
    player_2_id: Uuid,
    date_time: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM matches
            WHERE date_time = ?
              AND (player_1_id IN (?, ?) OR player_2_id IN (?, ?))
        )
        "#,
    )
    .bind(date_time)
    .bind(player_1_id)
    .bind(player_2_id)
    .bind(player_1_id)
    .bind(player_2_id)
    .fetch_one(db)
    .await?;
    Ok(row.0)
}

/// Resolve a pending match. Returns whether it was still pending.
pub async fn resolve(
    db: impl SqliteExecutor<'_>,
    id: Uuid,
    status: MatchStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE matches SET status = ? WHERE id = ? AND status = 'pending'")
        .bind(status)
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() == 1)
}

/// All matches of a club, latest first.
pub async fn list_for_club(
    db: impl SqliteExecutor<'_>,
    club_id: Uuid,
) -> Result<Vec<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE club_id = ? ORDER BY date_time DESC")
        .bind(club_id)
        .fetch_all(db)
        .await
}

/// Every match a user plays in, latest first.
pub async fn list_for_player(
    db: impl SqliteExecutor<'_>,
    user_id: Uuid,
) -> Result<Vec<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>(
        "SELECT * FROM matches WHERE player_1_id = ? OR player_2_id = ? ORDER BY date_time DESC",
    )
    .bind(user_id)
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// A user's matches inside one club, latest first.
pub async fn list_for_player_in_club(
    db: impl SqliteExecutor<'_>,
    user_id: Uuid,
    club_id: Uuid,
) -> Result<Vec<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>(
        r#"
        SELECT * FROM matches
        WHERE club_id = ? AND (player_1_id = ? OR player_2_id = ?)
        ORDER BY date_time DESC
        "#,
    )
    .bind(club_id)
    .bind(user_id)
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Delete every match of a club.
pub async fn delete_for_club(db: impl SqliteExecutor<'_>, club_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM matches WHERE club_id = ?")
        .bind(club_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

/// Delete every match a user plays in.
pub async fn delete_for_player(
    db: impl SqliteExecutor<'_>,
    user_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM matches WHERE player_1_id = ? OR player_2_id = ?")
        .bind(user_id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
