//! Application repository — join requests and their review status.

use chrono::Utc;
use polecat_common::models::application::{Application, ApplicationReview, ApplicationStatus};
use sqlx::SqliteExecutor;
use uuid::Uuid;

/// Insert an application in the given status.
pub async fn create_application(
    db: impl SqliteExecutor<'_>,
    user_id: Uuid,
    club_id: Uuid,
    personal_statement: &str,
    status: ApplicationStatus,
) -> Result<Application, sqlx::Error> {
    sqlx::query_as::<_, Application>(
        r#"
        INSERT INTO applications (id, user_id, club_id, personal_statement, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(user_id)
    .bind(club_id)
    .bind(personal_statement)
    .bind(status)
    .bind(Utc::now())
    .fetch_one(db)
    .await
}

/// Find an application by ID.
pub async fn find_by_id(
    db: impl SqliteExecutor<'_>,
    id: Uuid,
) -> Result<Option<Application>, sqlx::Error> {
    sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Whether the user has an application to the club in `status`.
pub async fn exists_with_status(
    db: impl SqliteExecutor<'_>,
    user_id: Uuid,
    club_id: Uuid,
    status: ApplicationStatus,
) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as(
        "SELECT EXISTS(SELECT 1 FROM applications WHERE user_id = ? AND club_id = ? AND status = ?)",
    )
    .bind(user_id)
    .bind(club_id)
    .bind(status)
    .fetch_one(db)
    .await?;
    Ok(row.0)
}

/// Move an application from `from` to `to`. Returns whether it was still in `from`.
pub async fn transition(
    db: impl SqliteExecutor<'_>,
    id: Uuid,
    from: ApplicationStatus,
    to: ApplicationStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE applications SET status = ? WHERE id = ? AND status = ?")
        .bind(to)
        .bind(id)
        .bind(from)
        .execute(db)
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Flip the user's accepted application for the club to rejected (leaving or removal).
pub async fn reject_accepted(
    db: impl SqliteExecutor<'_>,
    user_id: Uuid,
    club_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE applications SET status = 'rejected' \
         WHERE user_id = ? AND club_id = ? AND status = 'accepted'",
    )
    .bind(user_id)
    .bind(club_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

/// Delete a pending application owned by `user_id`. Returns whether one was deleted.
pub async fn delete_pending(
    db: impl SqliteExecutor<'_>,
    id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM applications WHERE id = ? AND user_id = ? AND status = 'pending'")
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
    Ok(result.rows_affected() == 1)
}

/// A user's applications, newest first.
pub async fn list_for_user(
    db: impl SqliteExecutor<'_>,
    user_id: Uuid,
) -> Result<Vec<Application>, sqlx::Error> {
    sqlx::query_as::<_, Application>(
        "SELECT * FROM applications WHERE user_id = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Pending applications to a club with the applicant's profile, oldest first.
pub async fn list_pending_for_club(
    db: impl SqliteExecutor<'_>,
    club_id: Uuid,
) -> Result<Vec<ApplicationReview>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationReview>(
        r#"
        SELECT a.id, a.user_id, u.username, u.first_name, u.last_name, u.experience_level,
               a.personal_statement, a.created_at
        FROM applications a
        INNER JOIN users u ON u.id = a.user_id
        WHERE a.club_id = ? AND a.status = 'pending'
        ORDER BY a.created_at, a.id
        "#,
    )
    .bind(club_id)
    .fetch_all(db)
    .await
}

/// Personal statement of the user's accepted application to the club.
pub async fn accepted_statement(
    db: impl SqliteExecutor<'_>,
    user_id: Uuid,
    club_id: Uuid,
) -> Result<Option<String>, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as(
        "SELECT personal_statement FROM applications \
         WHERE user_id = ? AND club_id = ? AND status = 'accepted'",
    )
    .bind(user_id)
    .bind(club_id)
    .fetch_optional(db)
    .await?;
    Ok(row.map(|r| r.0))
}

/// Count a user's applications to a club in `status`.
pub async fn count_with_status(
    db: impl SqliteExecutor<'_>,
    user_id: Uuid,
    club_id: Uuid,
    status: ApplicationStatus,
) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM applications WHERE user_id = ? AND club_id = ? AND status = ?",
    )
    .bind(user_id)
    .bind(club_id)
    .bind(status)
    .fetch_one(db)
    .await?;
    Ok(row.0)
}

/// Delete every application to a club.
pub async fn delete_for_club(db: impl SqliteExecutor<'_>, club_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM applications WHERE club_id = ?")
        .bind(club_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

/// Delete every application a user made.
pub async fn delete_for_user(db: impl SqliteExecutor<'_>, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM applications WHERE user_id = ?")
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
