//! Membership repository — who holds which role in which club.

use chrono::Utc;
use polecat_common::models::membership::{MemberEntry, Membership};
use polecat_common::role::Role;
use sqlx::SqliteExecutor;
use uuid::Uuid;

/// Add a user to a club with the given role.
pub async fn add_member(
    db: impl SqliteExecutor<'_>,
    user_id: Uuid,
    club_id: Uuid,
    role: Role,
) -> Result<Membership, sqlx::Error> {
    sqlx::query_as::<_, Membership>(
        r#"
        INSERT INTO memberships (id, user_id, club_id, role, joined_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(user_id)
    .bind(club_id)
    .bind(role)
    .bind(Utc::now())
    .fetch_one(db)
    .await
}

/// The user's current role in the club, `None` for non-members.
pub async fn role_of(
    db: impl SqliteExecutor<'_>,
    user_id: Uuid,
    club_id: Uuid,
) -> Result<Option<Role>, sqlx::Error> {
    let row: Option<(Role,)> =
        sqlx::query_as("SELECT role FROM memberships WHERE user_id = ? AND club_id = ?")
            .bind(user_id)
            .bind(club_id)
            .fetch_optional(db)
            .await?;
    Ok(row.map(|r| r.0))
}

/// Set a member's role, but only if it currently is `from`.
///
/// Returns whether a row changed, so a concurrent role change makes the caller's
/// transition a no-op instead of overwriting it.
pub async fn change_role(
    db: impl SqliteExecutor<'_>,
    user_id: Uuid,
    club_id: Uuid,
    from: Role,
    to: Role,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("UPDATE memberships SET role = ? WHERE user_id = ? AND club_id = ? AND role = ?")
            .bind(to)
            .bind(user_id)
            .bind(club_id)
            .bind(from)
            .execute(db)
            .await?;
    Ok(result.rows_affected() == 1)
}

/// Remove a member from a club.
pub async fn remove_member(
    db: impl SqliteExecutor<'_>,
    user_id: Uuid,
    club_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM memberships WHERE user_id = ? AND club_id = ?")
        .bind(user_id)
        .bind(club_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

/// List members of a club with their profile, ordered by name.
pub async fn list_members(
    db: impl SqliteExecutor<'_>,
    club_id: Uuid,
) -> Result<Vec<MemberEntry>, sqlx::Error> {
    sqlx::query_as::<_, MemberEntry>(
        r#"
        SELECT u.id AS user_id, u.username, u.first_name, u.last_name, u.experience_level,
               m.role, m.joined_at
        FROM memberships m
        INNER JOIN users u ON u.id = m.user_id
        WHERE m.club_id = ?
        ORDER BY u.first_name, u.last_name
        "#,
    )
    .bind(club_id)
    .fetch_all(db)
    .await
}

/// The owner's user ID.
pub async fn find_owner(
    db: impl SqliteExecutor<'_>,
    club_id: Uuid,
) -> Result<Option<Uuid>, sqlx::Error> {
    let row: Option<(Uuid,)> =
        sqlx::query_as("SELECT user_id FROM memberships WHERE club_id = ? AND role = 'owner'")
            .bind(club_id)
            .fetch_optional(db)
            .await?;
    Ok(row.map(|r| r.0))
}

/// Number of members (any role) in a club.
pub async fn count_members(db: impl SqliteExecutor<'_>, club_id: Uuid) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM memberships WHERE club_id = ?")
        .bind(club_id)
        .fetch_one(db)
        .await?;
    Ok(row.0)
}

/// Whether the user owns at least one club.
pub async fn owns_any_club(db: impl SqliteExecutor<'_>, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as(
        "SELECT EXISTS(SELECT 1 FROM memberships WHERE user_id = ? AND role = 'owner')",
    )
    .bind(user_id)
    .fetch_one(db)
    .await?;
    Ok(row.0)
}

/// Email addresses of everyone holding a membership in the club.
pub async fn member_emails(
    db: impl SqliteExecutor<'_>,
    club_id: Uuid,
) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT u.email FROM memberships m
        INNER JOIN users u ON u.id = m.user_id
        WHERE m.club_id = ?
        ORDER BY u.email
        "#,
    )
    .bind(club_id)
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(|r| r.0).collect())
}

/// Delete every membership in a club.
pub async fn delete_for_club(db: impl SqliteExecutor<'_>, club_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM memberships WHERE club_id = ?")
        .bind(club_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

/// Delete every membership a user holds.
pub async fn delete_for_user(db: impl SqliteExecutor<'_>, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM memberships WHERE user_id = ?")
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
