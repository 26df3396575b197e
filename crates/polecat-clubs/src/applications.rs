//! Application workflow: `Pending` → `Accepted` | `Rejected`.
//!
//! Accepting creates the `Member` row in the same transaction. A user holds at most one
//! pending and one accepted application per club; the partial unique indexes enforce
//! it and the pre-check only exists to answer with a readable message.

use polecat_common::error::{PolecatError, PolecatResult};
use polecat_common::models::{
    Application, ApplicationReview, ApplicationStatus, CreateApplicationRequest, Membership,
};
use polecat_common::role::Role;
use polecat_common::validation::validate_request;
use polecat_db::repository::{applications, memberships};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::{guard, storage_error};

/// Ask to join a club.
pub async fn apply(
    pool: &SqlitePool,
    actor: Uuid,
    club_id: Uuid,
    body: &CreateApplicationRequest,
) -> PolecatResult<Application> {
    let mut tx = pool.begin().await?;
    guard::club(&mut tx, club_id).await?;
    validate_request(body)?;

    for status in [ApplicationStatus::Pending, ApplicationStatus::Accepted] {
        if applications::exists_with_status(&mut *tx, actor, club_id, status).await? {
            return Err(PolecatError::conflict(
                "Application for this club has already been submitted",
            ));
        }
    }

    let application = applications::create_application(
        &mut *tx,
        actor,
        club_id,
        body.personal_statement.trim(),
        ApplicationStatus::Pending,
    )
    .await
    .map_err(storage_error)?;

    tx.commit().await?;
    tracing::info!(%actor, %club_id, application_id = %application.id, "Application submitted");
    Ok(application)
}

/// Withdraw one's own pending application. The row is deleted.
pub async fn cancel(pool: &SqlitePool, actor: Uuid, application_id: Uuid) -> PolecatResult<()> {
    let mut tx = pool.begin().await?;

    let application = applications::find_by_id(&mut *tx, application_id)
        .await?
        .filter(|a| a.user_id == actor)
        .ok_or_else(|| PolecatError::not_found("Application"))?;
    if !application.is_pending()
        || !applications::delete_pending(&mut *tx, application_id, actor).await?
    {
        return Err(PolecatError::conflict(
            "Cannot cancel application that has already been processed.",
        ));
    }

    tx.commit().await?;
    tracing::info!(%actor, %application_id, "Application cancelled");
    Ok(())
}

/// Accept a pending application and enrol the applicant as a `Member`.
pub async fn accept(
    pool: &SqlitePool,
    actor: Uuid,
    club_id: Uuid,
    application_id: Uuid,
) -> PolecatResult<Membership> {
    let mut tx = pool.begin().await?;
    let application = review(&mut tx, actor, club_id, application_id).await?;

    if !applications::transition(
        &mut *tx,
        application_id,
        ApplicationStatus::Pending,
        ApplicationStatus::Accepted,
    )
    .await
    .map_err(storage_error)?
    {
        return Err(PolecatError::conflict("You cannot accept that application!"));
    }
    let membership = memberships::add_member(&mut *tx, application.user_id, club_id, Role::Member)
        .await
        .map_err(storage_error)?;

    tx.commit().await?;
    tracing::info!(%actor, %club_id, %application_id, user_id = %application.user_id, "Application accepted");
    Ok(membership)
}

/// Reject a pending application.
pub async fn reject(
    pool: &SqlitePool,
    actor: Uuid,
    club_id: Uuid,
    application_id: Uuid,
) -> PolecatResult<()> {
    let mut tx = pool.begin().await?;
    let application = review(&mut tx, actor, club_id, application_id).await?;

    if !applications::transition(
        &mut *tx,
        application_id,
        ApplicationStatus::Pending,
        ApplicationStatus::Rejected,
    )
    .await?
    {
        return Err(PolecatError::conflict("You cannot reject that application!"));
    }

    tx.commit().await?;
    tracing::info!(%actor, %club_id, %application_id, user_id = %application.user_id, "Application rejected");
    Ok(())
}

/// The actor's own applications, newest first.
pub async fn my_applications(pool: &SqlitePool, actor: Uuid) -> PolecatResult<Vec<Application>> {
    Ok(applications::list_for_user(pool, actor).await?)
}

/// The club's review queue. Requires Officer or Owner.
pub async fn pending_for_club(
    pool: &SqlitePool,
    actor: Uuid,
    club_id: Uuid,
) -> PolecatResult<Vec<ApplicationReview>> {
    let mut conn = pool.acquire().await?;
    guard::club(&mut conn, club_id).await?;
    guard::require_role(&mut conn, actor, club_id, Role::Officer).await?;
    Ok(applications::list_pending_for_club(&mut *conn, club_id).await?)
}

/// Common preamble of accept and reject: officer of an existing club, and the
/// application belongs to that club.
async fn review(
    conn: &mut SqliteConnection,
    actor: Uuid,
    club_id: Uuid,
    application_id: Uuid,
) -> PolecatResult<Application> {
    guard::club(&mut *conn, club_id).await?;
    guard::require_role(&mut *conn, actor, club_id, Role::Officer).await?;
    applications::find_by_id(&mut *conn, application_id)
        .await?
        .filter(|a| a.club_id == club_id)
        .ok_or_else(|| PolecatError::not_found("Application"))
}
