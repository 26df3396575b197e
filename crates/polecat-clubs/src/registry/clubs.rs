//! Club lifecycle and the club-scoped read models.

use polecat_common::error::{PolecatError, PolecatResult};
use polecat_common::models::{
    ApplicationStatus, Club, ClubSummary, CreateClubRequest, Match, MemberEntry, OWNER_STATEMENT,
    UserResponse,
};
use polecat_common::role::Role;
use polecat_common::validation::validate_request;
use polecat_db::repository::{applications, clubs, matches, memberships, users};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::matches::MatchBoard;
use crate::{guard, storage_error};

/// Landing page data for a signed-in user.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    /// Clubs the user belongs to, in any role.
    pub my_clubs: Vec<ClubSummary>,
    /// Clubs the user could apply to.
    pub other_clubs: Vec<ClubSummary>,
    pub owned_clubs: Vec<ClubSummary>,
}

#[derive(Debug, Serialize)]
pub struct ClubHome {
    pub club: Club,
    pub owner_id: Option<Uuid>,
    pub member_count: i64,
    /// The viewer's role.
    pub role: Role,
    pub matches: Vec<Match>,
}

/// One member as seen from inside the club.
#[derive(Debug, Serialize)]
pub struct MemberProfile {
    pub user: UserResponse,
    pub role: Role,
    pub personal_statement: Option<String>,
    pub matches: MatchBoard,
}

/// Create a club owned by the actor.
///
/// The creator gets an accepted application and an `Owner` membership in the same
/// transaction, so the club is never observable without its owner.
pub async fn create_club(
    pool: &SqlitePool,
    actor: Uuid,
    body: &CreateClubRequest,
) -> PolecatResult<Club> {
    validate_request(body)?;
    let name = body.name.trim();

    let mut tx = pool.begin().await?;
    if clubs::find_by_name(&mut *tx, name).await?.is_some() {
        return Err(PolecatError::field("name", "This club name is taken!"));
    }

    let club = clubs::create_club(
        &mut *tx,
        Uuid::now_v7(),
        name,
        body.location.trim(),
        body.description.trim(),
    )
    .await
    .map_err(storage_error)?;
    applications::create_application(
        &mut *tx,
        actor,
        club.id,
        OWNER_STATEMENT,
        ApplicationStatus::Accepted,
    )
    .await
    .map_err(storage_error)?;
    memberships::add_member(&mut *tx, actor, club.id, Role::Owner)
        .await
        .map_err(storage_error)?;

    tx.commit().await?;
    tracing::info!(%actor, club_id = %club.id, name = %club.name, "Club created");
    Ok(club)
}

/// Delete a club and everything in it. Requires Owner.
///
/// Returns the e-mail addresses of everyone who was a member so the caller can let
/// them know.
pub async fn delete_club(pool: &SqlitePool, actor: Uuid, club_id: Uuid) -> PolecatResult<Vec<String>> {
    let mut tx = pool.begin().await?;
    guard::club(&mut tx, club_id).await?;
    guard::require_role(&mut tx, actor, club_id, Role::Owner).await?;

    let emails = memberships::member_emails(&mut *tx, club_id).await?;
    matches::delete_for_club(&mut *tx, club_id).await?;
    applications::delete_for_club(&mut *tx, club_id).await?;
    memberships::delete_for_club(&mut *tx, club_id).await?;
    clubs::delete_club(&mut *tx, club_id).await?;

    tx.commit().await?;
    tracing::info!(%actor, %club_id, members = emails.len(), "Club deleted");
    Ok(emails)
}

pub async fn dashboard(pool: &SqlitePool, actor: Uuid) -> PolecatResult<Dashboard> {
    Ok(Dashboard {
        my_clubs: clubs::list_user_clubs(pool, actor, false).await?,
        other_clubs: clubs::list_other_clubs(pool, actor).await?,
        owned_clubs: clubs::list_user_clubs(pool, actor, true).await?,
    })
}

/// A club's home page. Requires membership.
pub async fn club_home(pool: &SqlitePool, actor: Uuid, club_id: Uuid) -> PolecatResult<ClubHome> {
    let mut conn = pool.acquire().await?;
    let club = guard::club(&mut conn, club_id).await?;
    let role = guard::require_role(&mut conn, actor, club_id, Role::Member).await?;

    Ok(ClubHome {
        owner_id: memberships::find_owner(&mut *conn, club_id).await?,
        member_count: memberships::count_members(&mut *conn, club_id).await?,
        matches: matches::list_for_club(&mut *conn, club_id).await?,
        club,
        role,
    })
}

/// Everyone in the club. Requires membership.
pub async fn members_list(
    pool: &SqlitePool,
    actor: Uuid,
    club_id: Uuid,
) -> PolecatResult<Vec<MemberEntry>> {
    let mut conn = pool.acquire().await?;
    guard::club(&mut conn, club_id).await?;
    guard::require_role(&mut conn, actor, club_id, Role::Member).await?;
    Ok(memberships::list_members(&mut *conn, club_id).await?)
}

/// One member's profile and their matches in this club. Requires membership.
pub async fn show_member(
    pool: &SqlitePool,
    actor: Uuid,
    club_id: Uuid,
    user_id: Uuid,
) -> PolecatResult<MemberProfile> {
    let mut conn = pool.acquire().await?;
    guard::club(&mut conn, club_id).await?;
    guard::require_role(&mut conn, actor, club_id, Role::Member).await?;

    let role = memberships::role_of(&mut *conn, user_id, club_id)
        .await?
        .ok_or_else(|| PolecatError::not_found("Member"))?;
    let user = users::find_by_id(&mut *conn, user_id)
        .await?
        .ok_or_else(|| PolecatError::not_found("User"))?;
    let personal_statement = applications::accepted_statement(&mut *conn, user_id, club_id).await?;
    let games = matches::list_for_player_in_club(&mut *conn, user_id, club_id).await?;

    Ok(MemberProfile {
        user: user.into(),
        role,
        personal_statement,
        matches: MatchBoard::for_player(user_id, games),
    })
}
