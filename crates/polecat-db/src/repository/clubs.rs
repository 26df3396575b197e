//! Club repository.

use chrono::Utc;
use polecat_common::models::club::{Club, ClubSummary};
use sqlx::SqliteExecutor;
use uuid::Uuid;

/// Create a new club.
pub async fn create_club(
    db: impl SqliteExecutor<'_>,
    id: Uuid,
    name: &str,
    location: &str,
    description: &str,
) -> Result<Club, sqlx::Error> {
    sqlx::query_as::<_, Club>(
        r#"
        INSERT INTO clubs (id, name, location, description, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(location)
    .bind(description)
    .bind(Utc::now())
    .fetch_one(db)
    .await
}

/// Find a club by ID.
pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: Uuid) -> Result<Option<Club>, sqlx::Error> {
    sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Find a club by its unique name.
pub async fn find_by_name(
    db: impl SqliteExecutor<'_>,
    name: &str,
) -> Result<Option<Club>, sqlx::Error> {
    sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE name = ?")
        .bind(name)
        .fetch_optional(db)
        .await
}

/// Delete the club row. Dependent rows must already be gone.
pub async fn delete_club(db: impl SqliteExecutor<'_>, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM clubs WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

/// Clubs the user holds a membership in, optionally only those with a given role.
pub async fn list_user_clubs(
    db: impl SqliteExecutor<'_>,
    user_id: Uuid,
    owner_only: bool,
) -> Result<Vec<ClubSummary>, sqlx::Error> {
    sqlx::query_as::<_, ClubSummary>(
        r#"
        SELECT c.id, c.name, c.location, c.description,
               (SELECT COUNT(*) FROM memberships x WHERE x.club_id = c.id) AS member_count
        FROM clubs c
        INNER JOIN memberships m ON m.club_id = c.id
        WHERE m.user_id = ? AND (? = 0 OR m.role = 'owner')
        ORDER BY c.name
        "#,
    )
    .bind(user_id)
    .bind(owner_only)
    .fetch_all(db)
    .await
}

/// Clubs the user is not a member of (candidates to apply to).
pub async fn list_other_clubs(
    db: impl SqliteExecutor<'_>,
    user_id: Uuid,
) -> Result<Vec<ClubSummary>, sqlx::Error> {
    sqlx::query_as::<_, ClubSummary>(
        r#"
        SELECT c.id, c.name, c.location, c.description,
               (SELECT COUNT(*) FROM memberships x WHERE x.club_id = c.id) AS member_count
        FROM clubs c
        WHERE NOT EXISTS (
            SELECT 1 FROM memberships m WHERE m.club_id = c.id AND m.user_id = ?
        )
        ORDER BY c.name
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}
