//! Membership role engine.
//!
//! Roles move along `Member` ⇄ `Officer`, and ownership moves by swapping the owner to
//! `Officer` and the target to `Owner` in one transaction. Every operation re-reads the
//! actor's role inside its transaction, so a demotion that landed between page load and
//! submit is honoured.

use polecat_common::error::{PolecatError, PolecatResult};
use polecat_common::role::Role;
use polecat_db::repository::{applications, memberships};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::guard;

/// Result of a successful ownership transfer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    Transferred,
    /// The actor targeted themself; nothing changed.
    AlreadyOwner,
}

/// Promote a plain member to officer. Requires Officer or Owner.
pub async fn promote(pool: &SqlitePool, actor: Uuid, club_id: Uuid, target: Uuid) -> PolecatResult<()> {
    let mut tx = pool.begin().await?;
    guard::club(&mut tx, club_id).await?;
    guard::require_role(&mut tx, actor, club_id, Role::Officer).await?;

    let current = target_role(&mut tx, target, club_id).await?;
    if current != Role::Member
        || !memberships::change_role(&mut *tx, target, club_id, Role::Member, Role::Officer).await?
    {
        return Err(PolecatError::conflict("Only members can be promoted."));
    }

    tx.commit().await?;
    tracing::info!(%actor, %club_id, user_id = %target, "Member promoted");
    Ok(())
}

/// Demote an officer to member. Requires Owner.
pub async fn demote(pool: &SqlitePool, actor: Uuid, club_id: Uuid, target: Uuid) -> PolecatResult<()> {
    let mut tx = pool.begin().await?;
    guard::club(&mut tx, club_id).await?;
    guard::require_role(&mut tx, actor, club_id, Role::Owner).await?;

    let current = target_role(&mut tx, target, club_id).await?;
    if current != Role::Officer
        || !memberships::change_role(&mut *tx, target, club_id, Role::Officer, Role::Member).await?
    {
        return Err(PolecatError::conflict("Only officers can be demoted."));
    }

    tx.commit().await?;
    tracing::info!(%actor, %club_id, user_id = %target, "Officer demoted");
    Ok(())
}

/// Remove someone ranked strictly below the actor. Officers remove members; the owner
/// removes members and officers; nobody removes themself or the owner.
pub async fn remove(pool: &SqlitePool, actor: Uuid, club_id: Uuid, target: Uuid) -> PolecatResult<()> {
    let mut tx = pool.begin().await?;
    guard::club(&mut tx, club_id).await?;
    let actor_role = guard::require_role(&mut tx, actor, club_id, Role::Officer).await?;

    let current = target_role(&mut tx, target, club_id).await?;
    if actor_role <= current {
        tracing::warn!(%actor, %club_id, user_id = %target, "Removal refused");
        return Err(PolecatError::forbidden("You are not authorized to proceed!"));
    }

    drop_membership(&mut tx, target, club_id).await?;

    tx.commit().await?;
    tracing::info!(%actor, %club_id, user_id = %target, role = %current, "Member removed");
    Ok(())
}

/// Hand the club to another member. The actor becomes an officer.
pub async fn transfer_ownership(
    pool: &SqlitePool,
    actor: Uuid,
    club_id: Uuid,
    target: Uuid,
) -> PolecatResult<Transfer> {
    let mut tx = pool.begin().await?;
    guard::club(&mut tx, club_id).await?;
    guard::require_role(&mut tx, actor, club_id, Role::Owner).await?;

    if target == actor {
        return Ok(Transfer::AlreadyOwner);
    }
    let current = target_role(&mut tx, target, club_id).await?;

    // The old owner steps down first: the schema allows one owner row per club.
    let stepped_down =
        memberships::change_role(&mut *tx, actor, club_id, Role::Owner, Role::Officer).await?;
    let stepped_up = memberships::change_role(&mut *tx, target, club_id, current, Role::Owner)
        .await
        .map_err(crate::storage_error)?;
    if !(stepped_down && stepped_up) {
        return Err(PolecatError::conflict("Ownership could not be transferred."));
    }

    tx.commit().await?;
    tracing::info!(%actor, %club_id, user_id = %target, "Ownership transferred");
    Ok(Transfer::Transferred)
}

/// Leave a club voluntarily. The owner has to transfer ownership first.
pub async fn leave(pool: &SqlitePool, user_id: Uuid, club_id: Uuid) -> PolecatResult<()> {
    let mut tx = pool.begin().await?;
    guard::club(&mut tx, club_id).await?;
    let role = guard::require_role(&mut tx, user_id, club_id, Role::Member).await?;
    if role == Role::Owner {
        return Err(PolecatError::conflict("Owners are not allowed to leave their club."));
    }

    drop_membership(&mut tx, user_id, club_id).await?;

    tx.commit().await?;
    tracing::info!(%user_id, %club_id, "Member left club");
    Ok(())
}

async fn target_role(conn: &mut SqliteConnection, user_id: Uuid, club_id: Uuid) -> PolecatResult<Role> {
    memberships::role_of(&mut *conn, user_id, club_id)
        .await?
        .ok_or_else(|| PolecatError::not_found("Member"))
}

/// Retire the accepted application, then delete the membership row.
async fn drop_membership(conn: &mut SqliteConnection, user_id: Uuid, club_id: Uuid) -> PolecatResult<()> {
    applications::reject_accepted(&mut *conn, user_id, club_id).await?;
    memberships::remove_member(&mut *conn, user_id, club_id).await?;
    Ok(())
}
