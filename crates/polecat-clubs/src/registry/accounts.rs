//! Account lifecycle: sign up, log in, profile and password changes, closure.

use polecat_common::error::{PolecatError, PolecatResult};
use polecat_common::models::{
    ChangePasswordRequest, LoginRequest, SignUpRequest, UpdateProfileRequest, User,
};
use polecat_common::validation::validate_request;
use polecat_db::repository::{applications, matches, memberships, users};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::password::{hash_password, verify_password};
use crate::storage_error;

/// Register a new account.
pub async fn sign_up(pool: &SqlitePool, body: &SignUpRequest) -> PolecatResult<User> {
    validate_request(body)?;

    if users::find_by_email(pool, &body.email).await?.is_some() {
        return Err(PolecatError::field("email", "A user with that email already exists."));
    }
    if users::find_by_username(pool, &body.username).await?.is_some() {
        return Err(PolecatError::field("username", "A user with that username already exists."));
    }

    let password_hash = hash_password(&body.new_password)?;
    let new = users::NewUser {
        email: &body.email,
        username: &body.username,
        first_name: &body.first_name,
        last_name: &body.last_name,
        bio: &body.bio,
        experience_level: body.experience_level,
        password_hash: &password_hash,
    };
    let user = users::create_user(pool, Uuid::now_v7(), &new)
        .await
        .map_err(storage_error)?;

    tracing::info!(user_id = %user.id, username = %user.username, "New user registered");
    Ok(user)
}

/// Check an email/password pair. Unknown email, wrong password and inactive accounts
/// all fail the same way.
pub async fn authenticate(pool: &SqlitePool, body: &LoginRequest) -> PolecatResult<User> {
    validate_request(body)?;

    let user = users::find_by_email(pool, &body.email)
        .await?
        .ok_or(PolecatError::InvalidCredentials)?;
    if !user.is_active || !verify_password(&body.password, &user.password_hash) {
        tracing::warn!(user_id = %user.id, "Failed login attempt");
        return Err(PolecatError::InvalidCredentials);
    }

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(user)
}

/// The actor's own account.
pub async fn profile(pool: &SqlitePool, actor: Uuid) -> PolecatResult<User> {
    users::find_by_id(pool, actor)
        .await?
        .ok_or_else(|| PolecatError::not_found("User"))
}

/// Replace the actor's profile fields.
pub async fn update_profile(
    pool: &SqlitePool,
    actor: Uuid,
    body: &UpdateProfileRequest,
) -> PolecatResult<User> {
    validate_request(body)?;

    if users::find_by_email(pool, &body.email)
        .await?
        .is_some_and(|u| u.id != actor)
    {
        return Err(PolecatError::field("email", "A user with that email already exists."));
    }
    if users::find_by_username(pool, &body.username)
        .await?
        .is_some_and(|u| u.id != actor)
    {
        return Err(PolecatError::field("username", "A user with that username already exists."));
    }

    let user = users::update_profile(pool, actor, body)
        .await
        .map_err(storage_error)?
        .ok_or_else(|| PolecatError::not_found("User"))?;

    tracing::info!(user_id = %actor, "Profile updated");
    Ok(user)
}

/// Change the actor's password after verifying the current one.
pub async fn change_password(
    pool: &SqlitePool,
    actor: Uuid,
    body: &ChangePasswordRequest,
) -> PolecatResult<()> {
    validate_request(body)?;

    let user = profile(pool, actor).await?;
    if !verify_password(&body.password, &user.password_hash) {
        return Err(PolecatError::field("password", "Incorrect current password!"));
    }

    let password_hash = hash_password(&body.new_password)?;
    users::update_password(pool, actor, &password_hash).await?;

    tracing::info!(user_id = %actor, "Password changed");
    Ok(())
}

/// Delete the actor's account with its matches, applications and memberships.
/// Refused while the actor owns a club.
pub async fn close_account(pool: &SqlitePool, actor: Uuid) -> PolecatResult<()> {
    let mut tx = pool.begin().await?;

    if users::find_by_id(&mut *tx, actor).await?.is_none() {
        return Err(PolecatError::not_found("User"));
    }
    if memberships::owns_any_club(&mut *tx, actor).await? {
        return Err(PolecatError::conflict(
            "Cannot close account if you are an owner of one or more clubs. \
             Transfer ownership or delete your clubs before closing your account",
        ));
    }

    let games = matches::delete_for_player(&mut *tx, actor).await?;
    let requests = applications::delete_for_user(&mut *tx, actor).await?;
    let clubs = memberships::delete_for_user(&mut *tx, actor).await?;
    users::delete_user(&mut *tx, actor).await?;

    tx.commit().await?;
    tracing::info!(user_id = %actor, games, requests, clubs, "Account closed");
    Ok(())
}
