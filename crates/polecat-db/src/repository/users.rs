//! User repository — CRUD operations for user accounts.

use chrono::Utc;
use polecat_common::models::user::{ExperienceLevel, UpdateProfileRequest, User};
use sqlx::SqliteExecutor;
use uuid::Uuid;

/// Fields needed to insert a user.
pub struct NewUser<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub bio: &'a str,
    pub experience_level: ExperienceLevel,
    pub password_hash: &'a str,
}

/// Create a new user account.
pub async fn create_user(
    db: impl SqliteExecutor<'_>,
    id: Uuid,
    user: &NewUser<'_>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, username, first_name, last_name, bio, experience_level,
                           password_hash, is_active, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1, ?)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user.email)
    .bind(user.username)
    .bind(user.first_name)
    .bind(user.last_name)
    .bind(user.bio)
    .bind(user.experience_level)
    .bind(user.password_hash)
    .bind(Utc::now())
    .fetch_one(db)
    .await
}

/// Find a user by their unique ID.
pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Find a user by email (case-insensitive, the column collates NOCASE).
pub async fn find_by_email(
    db: impl SqliteExecutor<'_>,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(db)
        .await
}

/// Find a user by username.
pub async fn find_by_username(
    db: impl SqliteExecutor<'_>,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(db)
        .await
}

/// Replace the editable profile fields.
pub async fn update_profile(
    db: impl SqliteExecutor<'_>,
    id: Uuid,
    profile: &UpdateProfileRequest,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET
            first_name = ?,
            last_name = ?,
            username = ?,
            email = ?,
            experience_level = ?,
            bio = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&profile.first_name)
    .bind(&profile.last_name)
    .bind(&profile.username)
    .bind(&profile.email)
    .bind(profile.experience_level)
    .bind(&profile.bio)
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Store a new password hash.
pub async fn update_password(
    db: impl SqliteExecutor<'_>,
    id: Uuid,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
        .bind(password_hash)
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

/// Delete the user row. Dependent rows must already be gone.
pub async fn delete_user(db: impl SqliteExecutor<'_>, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
